// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Promotion status flag mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{PROMOTION_STATUS_KEY, PromotionStatus};
use tracing::debug;

use crate::diesel_schema::promotion_status;
use crate::error::PersistenceError;

/// Overwrites the singleton promotion status flag.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `status` - The new flag value
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_promotion_status(
    conn: &mut SqliteConnection,
    status: PromotionStatus,
) -> Result<(), PersistenceError> {
    diesel::insert_into(promotion_status::table)
        .values((
            promotion_status::key.eq(PROMOTION_STATUS_KEY),
            promotion_status::value.eq(status.as_str()),
        ))
        .on_conflict(promotion_status::key)
        .do_update()
        .set(promotion_status::value.eq(status.as_str()))
        .execute(conn)?;

    debug!(status = %status, "Set promotion status");
    Ok(())
}
