use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument, warn};

use models::reservation::{self, Reservation};
use crate::errors::ServiceError;

/// Columns written on update. `customer_id` is left `NotSet` so it is only ever written on insert.
fn mutable_fields(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: NotSet,
        customer_id: NotSet,
        start_at: Set(r.start_at),
        num_guests: Set(r.num_guests),
        notes: Set(r.notes.clone()),
    }
}

/// Get a reservation by id.
#[instrument(skip(db))]
pub async fn get_reservation(db: &DatabaseConnection, id: i32) -> Result<Reservation, ServiceError> {
    reservation::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(Reservation::from)
        .ok_or_else(|| ServiceError::not_found("reservation", id))
}

/// All reservations of a customer, earliest first.
#[instrument(skip(db))]
pub async fn list_reservations_for_customer(db: &DatabaseConnection, customer_id: i32) -> Result<Vec<Reservation>, ServiceError> {
    let rows = reservation::Entity::find()
        .filter(reservation::Column::CustomerId.eq(customer_id))
        .order_by_asc(reservation::Column::StartAt)
        .order_by_asc(reservation::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Reservation::from).collect())
}

/// Insert when `id` is absent (assigning the new id), otherwise update guests, start time and notes.
#[instrument(skip(db, r), fields(id = ?r.id, customer_id = r.customer_id))]
pub async fn save_reservation(db: &DatabaseConnection, r: &mut Reservation) -> Result<(), ServiceError> {
    r.validate()?;
    match r.id {
        None => {
            let mut am = mutable_fields(r);
            am.customer_id = Set(r.customer_id);
            let created = am.insert(db).await?;
            r.id = Some(created.id);
            info!(id = created.id, customer_id = created.customer_id, "reservation created");
        }
        Some(id) => {
            let res = reservation::Entity::update_many()
                .set(mutable_fields(r))
                .filter(reservation::Column::Id.eq(id))
                .exec(db)
                .await?;
            if res.rows_affected == 0 {
                warn!(id, "reservation update matched no rows");
            } else {
                info!(id, "reservation updated");
            }
        }
    }
    Ok(())
}
