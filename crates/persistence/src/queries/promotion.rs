// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Promotion status flag queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use scolaris_domain::{PROMOTION_STATUS_KEY, PromotionStatus};
use std::str::FromStr;

use crate::diesel_schema::promotion_status;
use crate::error::PersistenceError;

/// Reads the singleton promotion status flag.
///
/// An absent row is equivalent to `Working`.
///
/// # Errors
///
/// Returns an error if the query fails or the stored value is corrupt.
pub fn get_promotion_status(
    conn: &mut SqliteConnection,
) -> Result<PromotionStatus, PersistenceError> {
    let stored: Option<String> = promotion_status::table
        .find(PROMOTION_STATUS_KEY)
        .select(promotion_status::value)
        .first::<String>(conn)
        .optional()?;

    stored.map_or(Ok(PromotionStatus::Working), |value| {
        PromotionStatus::from_str(&value)
            .map_err(|err| PersistenceError::CorruptRow(format!("promotion status: {err}")))
    })
}
