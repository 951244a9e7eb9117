use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::OpsStore;
use crate::domain::{BroadcastTarget, LocationId, Recurrence};
use crate::models::{BriefingItem, Identity, Location, NewBriefing};
use crate::services::briefing_service::{BriefingError, BriefingService};
use crate::services::validation::require_text;

/// Author name recorded when the poster has no usable display name.
const FALLBACK_AUTHOR: &str = "Core System";

pub struct DefaultBriefingService {
    store: Arc<dyn OpsStore>,
}

impl DefaultBriefingService {
    #[must_use]
    pub fn new(store: Arc<dyn OpsStore>) -> Self {
        Self { store }
    }
}

/// Resolves a broadcast target to concrete locations.
pub(crate) async fn target_locations(
    store: &dyn OpsStore,
    target: BroadcastTarget,
) -> anyhow::Result<Option<Vec<Location>>> {
    match target {
        BroadcastTarget::All => store.list_locations().await.map(Some),
        BroadcastTarget::Location(id) => Ok(store.find_location(id).await?.map(|l| vec![l])),
    }
}

pub(crate) fn author_name(author: &Identity, fallback: &str) -> String {
    let name = author.name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

#[async_trait]
impl BriefingService for DefaultBriefingService {
    async fn list_active(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<BriefingItem>, BriefingError> {
        Ok(self.store.list_active_briefings(location_id).await?)
    }

    async fn post(
        &self,
        author: &Identity,
        target: BroadcastTarget,
        content: &str,
        recurrence: Recurrence,
    ) -> Result<Vec<BriefingItem>, BriefingError> {
        if !author.role.is_lead() {
            return Err(BriefingError::Forbidden(
                "Only managers and core staff can post briefings".to_string(),
            ));
        }
        let content = require_text("Briefing content", content).map_err(BriefingError::Validation)?;

        let locations = target_locations(self.store.as_ref(), target)
            .await?
            .ok_or_else(|| BriefingError::NotFound(format!("Location {target:?}")))?;

        let created_by_name = author_name(author, FALLBACK_AUTHOR);
        let items = locations
            .iter()
            .map(|location| NewBriefing {
                location_id: location.id,
                content: content.clone(),
                recurrence,
                created_by_name: created_by_name.clone(),
            })
            .collect();

        let inserted = self.store.insert_briefings(items).await?;
        info!(
            author_id = %author.id,
            %recurrence,
            "Briefing posted to {} location(s)",
            inserted.len()
        );
        metrics::counter!("briefings_posted_total").increment(inserted.len() as u64);

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IdentityId, Role};
    use crate::test_support::{TestDb, spy::SpyStore};

    fn core_lead() -> Identity {
        Identity {
            id: IdentityId::new(1),
            name: "Achieng".into(),
            role: Role::Core,
        }
    }

    #[tokio::test]
    async fn broadcast_to_all_fans_out_one_item_per_location() {
        let db = TestDb::new().await;
        for name in ["Karen", "Kilimani", "Westlands"] {
            db.store.create_location(name).await.unwrap();
        }
        let service = DefaultBriefingService::new(db.ops_store());

        let posted = service
            .post(&core_lead(), BroadcastTarget::All, "  Price change on lattes ", Recurrence::Once)
            .await
            .unwrap();

        assert_eq!(posted.len(), 3);
        assert!(posted.iter().all(|item| item.is_active));
        assert!(posted.iter().all(|item| item.content == "Price change on lattes"));
        assert!(posted.iter().all(|item| item.created_by_name == "Achieng"));
    }

    #[tokio::test]
    async fn single_target_and_newest_first_listing() {
        let db = TestDb::new().await;
        let here = db.store.create_location("Westlands").await.unwrap();
        let there = db.store.create_location("Karen").await.unwrap();
        let service = DefaultBriefingService::new(db.ops_store());
        let target = BroadcastTarget::Location(here.id);

        service.post(&core_lead(), target, "First", Recurrence::Recurring).await.unwrap();
        service.post(&core_lead(), target, "Second", Recurrence::Recurring).await.unwrap();

        let listed: Vec<String> = service
            .list_active(here.id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.content)
            .collect();
        assert_eq!(listed, vec!["Second", "First"]);
        assert!(service.list_active(there.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_author_name_falls_back() {
        let db = TestDb::new().await;
        let loc = db.store.create_location("Westlands").await.unwrap();
        let service = DefaultBriefingService::new(db.ops_store());
        let nameless = Identity {
            name: "  ".into(),
            ..core_lead()
        };

        let posted = service
            .post(&nameless, BroadcastTarget::Location(loc.id), "Hello", Recurrence::Once)
            .await
            .unwrap();
        assert_eq!(posted[0].created_by_name, "Core System");
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let db = TestDb::new().await;
        let service = DefaultBriefingService::new(db.ops_store());

        let err = service
            .post(
                &core_lead(),
                BroadcastTarget::Location(LocationId::new(77)),
                "Hello",
                Recurrence::Once,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BriefingError::NotFound(_)));
    }

    #[tokio::test]
    async fn baristas_and_blank_content_are_rejected_without_store_calls() {
        let spy = SpyStore::shared();
        let service = DefaultBriefingService::new(spy.clone());
        let barista = Identity {
            role: Role::Barista,
            ..core_lead()
        };

        assert!(matches!(
            service.post(&barista, BroadcastTarget::All, "Hi", Recurrence::Once).await,
            Err(BriefingError::Forbidden(_))
        ));
        assert!(matches!(
            service.post(&core_lead(), BroadcastTarget::All, " \n ", Recurrence::Once).await,
            Err(BriefingError::Validation(_))
        ));
        assert_eq!(spy.calls(), 0);
    }
}
