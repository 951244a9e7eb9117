use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, warn};

use super::briefing::BriefingRepository;
use crate::domain::{BriefingId, IdentityId, LocationId, ShiftId};
use crate::entities::{prelude::*, shifts};
use crate::models::{NewShift, OpenShiftOutcome, Shift, now_timestamp};

/// Starts that fail without a competing open shift are retried this many times in total.
const OPEN_ATTEMPTS: u32 = 3;

/// Repository for the shift lifecycle.
pub struct ShiftRepository {
    conn: DatabaseConnection,
}

impl ShiftRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn map_model(model: shifts::Model) -> Shift {
        Shift {
            id: ShiftId::new(model.id),
            location_id: LocationId::new(model.location_id),
            bic_id: IdentityId::new(model.bic_id),
            start_time: model.start_time,
            end_time: model.end_time,
            cash_float_verified: model.cash_float_verified,
            briefing_completed: model.briefing_completed,
        }
    }

    async fn find_open_in<C: ConnectionTrait>(conn: &C, bic_id: IdentityId) -> Result<Option<Shift>> {
        let row = Shifts::find()
            .filter(shifts::Column::BicId.eq(bic_id.value()))
            .filter(shifts::Column::EndTime.is_null())
            .order_by_desc(shifts::Column::Id)
            .one(conn)
            .await
            .context("Failed to query open shift")?;

        Ok(row.map(Self::map_model))
    }

    /// The shift the identity is currently in charge of, if any.
    pub async fn find_open(&self, bic_id: IdentityId) -> Result<Option<Shift>> {
        Self::find_open_in(&self.conn, bic_id).await
    }

    /// Inserts a new open shift and deactivates the given one-time briefing
    /// items in a single transaction.
    ///
    /// Only items at the shift's location that are still active and have
    /// `once` recurrence are touched, whatever ids the caller passes. If the
    /// identity already has an open shift, nothing is written.
    ///
    /// A start that loses a race against another start for the same identity
    /// fails with a unique violation or a busy/locked error, depending on
    /// timing. Either way the transaction is rolled back and the open shift is
    /// looked up again; if one exists now the outcome is `AlreadyOpen`.
    pub async fn open(&self, new_shift: NewShift, consume: &[BriefingId]) -> Result<OpenShiftOutcome> {
        let mut attempt = 1;
        loop {
            let error = match self.try_open(&new_shift, consume).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => e,
            };

            if let Some(existing) = self.find_open(new_shift.bic_id).await? {
                warn!(
                    "Concurrent shift start rejected for identity {}: {:#}",
                    new_shift.bic_id, error
                );
                return Ok(OpenShiftOutcome::AlreadyOpen(existing));
            }

            if attempt >= OPEN_ATTEMPTS {
                return Err(error);
            }
            debug!(
                "Retrying shift start for identity {} (attempt {}): {:#}",
                new_shift.bic_id, attempt, error
            );
            attempt += 1;
        }
    }

    async fn try_open(&self, new_shift: &NewShift, consume: &[BriefingId]) -> Result<OpenShiftOutcome> {
        let txn = self.conn.begin().await?;

        match Self::write_shift(&txn, new_shift, consume).await {
            Ok(OpenShiftOutcome::Opened { shift, consumed }) => {
                txn.commit().await.context("Failed to commit shift start")?;

                info!(
                    "Opened shift {} at location {} for identity {} ({} one-time briefing item(s) consumed)",
                    shift.id, shift.location_id, shift.bic_id, consumed
                );
                Ok(OpenShiftOutcome::Opened { shift, consumed })
            }
            Ok(already_open) => {
                txn.rollback().await?;
                Ok(already_open)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!("Rollback after failed shift start failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    async fn write_shift(
        txn: &DatabaseTransaction,
        new_shift: &NewShift,
        consume: &[BriefingId],
    ) -> Result<OpenShiftOutcome> {
        if let Some(existing) = Self::find_open_in(txn, new_shift.bic_id).await? {
            return Ok(OpenShiftOutcome::AlreadyOpen(existing));
        }

        let model = shifts::ActiveModel {
            location_id: Set(new_shift.location_id.value()),
            bic_id: Set(new_shift.bic_id.value()),
            start_time: Set(now_timestamp()),
            end_time: Set(None),
            cash_float_verified: Set(new_shift.cash_float_verified),
            briefing_completed: Set(new_shift.briefing_completed),
            ..Default::default()
        }
        .insert(txn)
        .await
        .context("Failed to insert shift")?;

        let consumed =
            BriefingRepository::consume_one_time(txn, new_shift.location_id, consume).await?;

        Ok(OpenShiftOutcome::Opened {
            shift: Self::map_model(model),
            consumed,
        })
    }

    /// Sets `end_time` on the shift if it is still open and belongs to `bic_id`.
    ///
    /// Returns `false` when no row matched.
    pub async fn close(&self, id: ShiftId, bic_id: IdentityId) -> Result<bool> {
        let result = Shifts::update_many()
            .col_expr(
                shifts::Column::EndTime,
                sea_orm::sea_query::Expr::value(now_timestamp()),
            )
            .filter(shifts::Column::Id.eq(id.value()))
            .filter(shifts::Column::BicId.eq(bic_id.value()))
            .filter(shifts::Column::EndTime.is_null())
            .exec(&self.conn)
            .await
            .context("Failed to close shift")?;

        let closed = result.rows_affected > 0;
        if closed {
            info!("Closed shift {} for identity {}", id, bic_id);
        }
        Ok(closed)
    }
}
