//! List Reservations Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::BookingConfig;
use crate::domain::entity::GuestReservation;
use crate::domain::repository::ReservationRepository;
use crate::error::BookingResult;

pub struct ListReservationsUseCase<R>
where
    R: ReservationRepository,
{
    reservation_repo: Arc<R>,
    config: Arc<BookingConfig>,
}

impl<R> ListReservationsUseCase<R>
where
    R: ReservationRepository,
{
    pub fn new(reservation_repo: Arc<R>, config: Arc<BookingConfig>) -> Self {
        Self {
            reservation_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        guest_id: UserId,
        limit: Option<i64>,
    ) -> BookingResult<Vec<GuestReservation>> {
        self.reservation_repo
            .find_guest_reservations(guest_id, self.config.limit(limit))
            .await
    }
}
