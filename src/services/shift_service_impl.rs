use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::db::OpsStore;
use crate::domain::{BriefingId, IdentityId, Role, ShiftId, ShiftState};
use crate::models::{Identity, Location, NewShift, OpenShiftOutcome};
use crate::services::shift_service::{ShiftError, ShiftService, StartShift};

pub struct DefaultShiftService {
    store: Arc<dyn OpsStore>,
}

impl DefaultShiftService {
    #[must_use]
    pub fn new(store: Arc<dyn OpsStore>) -> Self {
        Self { store }
    }
}

fn check_start_request(identity: &Identity, request: &StartShift) -> Result<(), ShiftError> {
    if identity.role != Role::Barista {
        return Err(ShiftError::Validation(
            "Only baristas can start a shift".to_string(),
        ));
    }

    if !request.systems.all_verified() {
        return Err(ShiftError::Validation(format!(
            "Verify all systems before starting the shift: {}",
            request.systems.missing().join(", ")
        )));
    }

    if !request.briefing_acknowledged {
        return Err(ShiftError::Validation(
            "Acknowledge the briefing before starting the shift".to_string(),
        ));
    }

    Ok(())
}

#[async_trait]
impl ShiftService for DefaultShiftService {
    async fn refresh(&self, identity_id: IdentityId) -> Result<ShiftState, ShiftError> {
        let shift = self.store.find_open_shift(identity_id).await?;
        Ok(ShiftState::from(shift))
    }

    #[instrument(skip(self, identity, request), fields(identity_id = %identity.id, location_id = %request.location_id))]
    async fn start(
        &self,
        identity: &Identity,
        request: StartShift,
    ) -> Result<ShiftState, ShiftError> {
        check_start_request(identity, &request)?;

        let location = self
            .store
            .find_location(request.location_id)
            .await?
            .ok_or_else(|| ShiftError::NotFound(format!("Location {}", request.location_id)))?;

        let read_items: Vec<BriefingId> = match request.briefing_item_ids {
            Some(ids) => ids,
            None => self
                .store
                .list_active_briefings(location.id)
                .await?
                .into_iter()
                .map(|item| item.id)
                .collect(),
        };

        let new_shift = NewShift {
            location_id: location.id,
            bic_id: identity.id,
            cash_float_verified: true,
            briefing_completed: true,
        };

        match self.store.open_shift(new_shift, &read_items).await? {
            OpenShiftOutcome::Opened { shift, consumed } => {
                info!(
                    shift_id = %shift.id,
                    consumed,
                    "Shift started at {}", location.name
                );
                metrics::counter!("shift_transitions_total", "transition" => "start").increment(1);
            }
            OpenShiftOutcome::AlreadyOpen(existing) => {
                metrics::counter!("shift_transitions_total", "transition" => "start_rejected")
                    .increment(1);
                return Err(ShiftError::AlreadyOpen(existing.id));
            }
        }

        self.refresh(identity.id).await
    }

    #[instrument(skip(self, identity), fields(identity_id = %identity.id))]
    async fn end(&self, identity: &Identity, shift_id: ShiftId) -> Result<ShiftState, ShiftError> {
        let current = self.refresh(identity.id).await?;
        if current.shift_id() != Some(shift_id) {
            return Err(ShiftError::NotOpen);
        }

        if !self.store.close_shift(shift_id, identity.id).await? {
            return Err(ShiftError::NotOpen);
        }

        info!(shift_id = %shift_id, "Shift ended");
        metrics::counter!("shift_transitions_total", "transition" => "end").increment(1);

        self.refresh(identity.id).await
    }

    async fn locations(&self) -> Result<Vec<Location>, ShiftError> {
        Ok(self.store.list_locations().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Recurrence, SystemChecks};
    use crate::models::NewBriefing;
    use crate::test_support::{TestDb, cheap_security, spy::SpyStore};

    struct Fixture {
        db: TestDb,
        barista: Identity,
        location: Location,
    }

    async fn fixture() -> Fixture {
        let db = TestDb::new().await;
        let barista = db
            .store
            .create_identity("Amani", Role::Barista, "1234", &cheap_security())
            .await
            .unwrap();
        let location = db.store.create_location("Westlands").await.unwrap();
        Fixture {
            db,
            barista,
            location,
        }
    }

    fn ready(location: &Location) -> StartShift {
        StartShift {
            location_id: location.id,
            systems: SystemChecks::ALL,
            briefing_acknowledged: true,
            briefing_item_ids: None,
        }
    }

    #[tokio::test]
    async fn start_then_end_returns_to_no_shift() {
        let f = fixture().await;
        let service = DefaultShiftService::new(f.db.ops_store());

        assert_eq!(service.refresh(f.barista.id).await.unwrap(), ShiftState::NoShift);

        let opened = service.start(&f.barista, ready(&f.location)).await.unwrap();
        let shift_id = opened.shift_id().unwrap();
        let shift = opened.shift().unwrap();
        assert!(shift.cash_float_verified);
        assert!(shift.briefing_completed);

        // Every refresh in between agrees on the open shift.
        for _ in 0..3 {
            let again = service.refresh(f.barista.id).await.unwrap();
            assert_eq!(again.shift_id(), Some(shift_id));
        }

        let closed = service.end(&f.barista, shift_id).await.unwrap();
        assert_eq!(closed, ShiftState::NoShift);
        assert_eq!(service.refresh(f.barista.id).await.unwrap(), ShiftState::NoShift);
    }

    #[tokio::test]
    async fn any_unticked_check_is_rejected_before_the_store() {
        let spy = SpyStore::shared();
        let service = DefaultShiftService::new(spy.clone());
        let barista = Identity {
            id: IdentityId::new(1),
            name: "Amani".into(),
            role: Role::Barista,
        };

        let variants: [fn(&mut SystemChecks); 4] = [
            |c| c.pos = false,
            |c| c.wifi = false,
            |c| c.payment = false,
            |c| c.cash_float = false,
        ];
        for untick in variants {
            let mut systems = SystemChecks::ALL;
            untick(&mut systems);
            let request = StartShift {
                location_id: crate::domain::LocationId::new(1),
                systems,
                briefing_acknowledged: true,
                briefing_item_ids: None,
            };
            let err = service.start(&barista, request).await.unwrap_err();
            assert!(matches!(err, ShiftError::Validation(_)));
        }

        let unacknowledged = StartShift {
            location_id: crate::domain::LocationId::new(1),
            systems: SystemChecks::ALL,
            briefing_acknowledged: false,
            briefing_item_ids: None,
        };
        assert!(matches!(
            service.start(&barista, unacknowledged).await,
            Err(ShiftError::Validation(_))
        ));

        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn only_baristas_start_shifts() {
        let f = fixture().await;
        let manager = f
            .db
            .store
            .create_identity("Wanjiru", Role::Manager, "9999", &cheap_security())
            .await
            .unwrap();
        let service = DefaultShiftService::new(f.db.ops_store());

        let err = service.start(&manager, ready(&f.location)).await.unwrap_err();
        assert!(matches!(err, ShiftError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let f = fixture().await;
        let service = DefaultShiftService::new(f.db.ops_store());

        let mut request = ready(&f.location);
        request.location_id = crate::domain::LocationId::new(404);
        assert!(matches!(
            service.start(&f.barista, request).await,
            Err(ShiftError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn start_consumes_once_items_and_keeps_recurring_ones() {
        let f = fixture().await;
        let store = f.db.ops_store();
        store
            .insert_briefings(vec![
                NewBriefing {
                    location_id: f.location.id,
                    content: "New oat milk supplier from today".into(),
                    recurrence: Recurrence::Once,
                    created_by_name: "Core System".into(),
                },
                NewBriefing {
                    location_id: f.location.id,
                    content: "Check fridge temperatures".into(),
                    recurrence: Recurrence::Recurring,
                    created_by_name: "Core System".into(),
                },
            ])
            .await
            .unwrap();
        assert_eq!(store.list_active_briefings(f.location.id).await.unwrap().len(), 2);

        let service = DefaultShiftService::new(store.clone());
        service.start(&f.barista, ready(&f.location)).await.unwrap();

        let remaining = store.list_active_briefings(f.location.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].content, "Check fridge temperatures");
    }

    #[tokio::test]
    async fn second_start_fails_and_consumes_nothing() {
        let f = fixture().await;
        let store = f.db.ops_store();
        let service = DefaultShiftService::new(store.clone());

        let first = service.start(&f.barista, ready(&f.location)).await.unwrap();

        store
            .insert_briefings(vec![NewBriefing {
                location_id: f.location.id,
                content: "Inventory count tonight".into(),
                recurrence: Recurrence::Once,
                created_by_name: "Core System".into(),
            }])
            .await
            .unwrap();

        let err = service.start(&f.barista, ready(&f.location)).await.unwrap_err();
        match err {
            ShiftError::AlreadyOpen(id) => assert_eq!(Some(id), first.shift_id()),
            other => panic!("expected AlreadyOpen, got {other:?}"),
        }
        assert_eq!(store.list_active_briefings(f.location.id).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn racing_starts_open_one_shift_and_reject_the_other() {
        let f = fixture().await;
        let service = Arc::new(DefaultShiftService::new(f.db.ops_store()));

        for round in 0..10 {
            let barista = f
                .db
                .store
                .create_identity(&format!("Racer {round}"), Role::Barista, "1234", &cheap_security())
                .await
                .unwrap();

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let service = service.clone();
                    let barista = barista.clone();
                    let request = ready(&f.location);
                    tokio::spawn(async move { service.start(&barista, request).await })
                })
                .collect();

            let mut opened = Vec::new();
            let mut rejected = Vec::new();
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(state) => opened.push(state.shift_id().unwrap()),
                    Err(ShiftError::AlreadyOpen(id)) => rejected.push(id),
                    Err(other) => panic!("round {round}: unexpected error {other:?}"),
                }
            }

            assert_eq!(opened.len(), 1, "round {round}");
            assert_eq!(rejected, opened, "round {round}");
            assert_eq!(
                service.refresh(barista.id).await.unwrap().shift_id(),
                Some(opened[0])
            );
        }
    }

    #[tokio::test]
    async fn ending_a_shift_that_is_not_open_fails() {
        let f = fixture().await;
        let service = DefaultShiftService::new(f.db.ops_store());

        assert!(matches!(
            service.end(&f.barista, ShiftId::new(1)).await,
            Err(ShiftError::NotOpen)
        ));

        let opened = service.start(&f.barista, ready(&f.location)).await.unwrap();
        let open_id = opened.shift_id().unwrap();

        assert!(matches!(
            service.end(&f.barista, ShiftId::new(open_id.value() + 1)).await,
            Err(ShiftError::NotOpen)
        ));

        service.end(&f.barista, open_id).await.unwrap();
        assert!(matches!(
            service.end(&f.barista, open_id).await,
            Err(ShiftError::NotOpen)
        ));
    }
}
