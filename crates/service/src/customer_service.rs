use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::{info, instrument, warn};

use models::customer::{self, Customer, TopCustomer, TopCustomerRow};
use models::reservation::{self, Reservation};
use crate::{errors::ServiceError, reservation_service};

/// Size of the "top ten" ranking.
pub const TOP_CUSTOMERS_LIMIT: u64 = 10;

fn mutable_fields(c: &Customer) -> customer::ActiveModel {
    customer::ActiveModel {
        id: NotSet,
        first_name: Set(c.first_name.clone()),
        middle_name: Set(c.middle_name.clone()),
        last_name: Set(c.last_name.clone()),
        phone: Set(c.phone.clone()),
        notes: Set(c.notes.clone()),
    }
}

/// List every customer ordered by last name, then first name.
#[instrument(skip(db))]
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<Customer>, ServiceError> {
    let rows = customer::Entity::find()
        .order_by_asc(customer::Column::LastName)
        .order_by_asc(customer::Column::FirstName)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Customer::from).collect())
}

/// Get a customer by id.
#[instrument(skip(db))]
pub async fn get_customer(db: &DatabaseConnection, id: i32) -> Result<Customer, ServiceError> {
    customer::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(Customer::from)
        .ok_or_else(|| ServiceError::not_found("customer", id))
}

/// Customers whose first, middle or last name contains `fragment`, ignoring case.
/// An empty result is reported as `NotFound`.
#[instrument(skip(db))]
pub async fn find_customers_by_name(db: &DatabaseConnection, fragment: &str) -> Result<Vec<Customer>, ServiceError> {
    let pattern = format!("%{}%", fragment.to_lowercase());
    let name_like = |col: customer::Column| Expr::expr(Func::lower(Expr::col((customer::Entity, col)))).like(pattern.clone());

    let rows = customer::Entity::find()
        .filter(
            Condition::any()
                .add(name_like(customer::Column::FirstName))
                .add(name_like(customer::Column::MiddleName))
                .add(name_like(customer::Column::LastName)),
        )
        .order_by_asc(customer::Column::LastName)
        .order_by_asc(customer::Column::FirstName)
        .all(db)
        .await?;

    if rows.is_empty() {
        warn!(%fragment, "customer search matched nothing");
        return Err(ServiceError::not_found("customer", fragment));
    }
    info!(count = rows.len(), "customer search");
    Ok(rows.into_iter().map(Customer::from).collect())
}

/// Up to `limit` customers ranked by reservation count, highest first.
/// Customers without reservations count as 0; ties go to the lower id.
#[instrument(skip(db))]
pub async fn top_customers_by_reservations(db: &DatabaseConnection, limit: u64) -> Result<Vec<TopCustomer>, ServiceError> {
    let rows = customer::Entity::find()
        .select_only()
        .columns([
            customer::Column::Id,
            customer::Column::FirstName,
            customer::Column::MiddleName,
            customer::Column::LastName,
            customer::Column::Phone,
            customer::Column::Notes,
        ])
        .column_as(reservation::Column::Id.count(), "times")
        .join(JoinType::LeftJoin, customer::Relation::Reservation.def())
        .group_by(customer::Column::Id)
        .order_by_desc(reservation::Column::Id.count())
        .order_by_asc(customer::Column::Id)
        .limit(limit)
        .into_model::<TopCustomerRow>()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(TopCustomer::from).collect())
}

pub async fn top_ten_customers(db: &DatabaseConnection) -> Result<Vec<TopCustomer>, ServiceError> {
    top_customers_by_reservations(db, TOP_CUSTOMERS_LIMIT).await
}

/// Reservations of `customer`, earliest first. An unsaved customer has none.
pub async fn customer_reservations(db: &DatabaseConnection, customer: &Customer) -> Result<Vec<Reservation>, ServiceError> {
    match customer.id {
        Some(id) => reservation_service::list_reservations_for_customer(db, id).await,
        None => Ok(Vec::new()),
    }
}

/// Insert when `id` is absent (assigning the new id), otherwise overwrite every mutable column.
#[instrument(skip(db, c), fields(id = ?c.id))]
pub async fn save_customer(db: &DatabaseConnection, c: &mut Customer) -> Result<(), ServiceError> {
    c.validate()?;
    match c.id {
        None => {
            let created = mutable_fields(c).insert(db).await?;
            c.id = Some(created.id);
            info!(id = created.id, "customer created");
        }
        Some(id) => {
            let res = customer::Entity::update_many()
                .set(mutable_fields(c))
                .filter(customer::Column::Id.eq(id))
                .exec(db)
                .await?;
            if res.rows_affected == 0 {
                warn!(id, "customer update matched no rows");
            } else {
                info!(id, "customer updated");
            }
        }
    }
    Ok(())
}
