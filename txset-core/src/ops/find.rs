/*
 * Created on Sun Feb 01 2026
 *
 * This file is a part of txset
 * Copyright (c) 2026, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
*/

use crate::{desc::Desc, error::Result, list::List, ops::OpOutcome, sync::atm::Guard};

/// §4.G — walks to `key`'s position and always reports success. `Find`
/// does not gate a transaction's outcome: it exists so a sequence like
/// `[FIND a, DELETE b]` can still participate in help-graph cycle
/// detection and finalization bookkeeping the same way a mutating op
/// does. Presence of `key` is not returned here; a caller who wants to
/// know whether `key` was a member after commit has to inspect the list
/// itself (see [`crate::List::contains`]), not this op's outcome.
pub(crate) fn find<'g>(list: &'g List, key: u32, _desc: &Desc, _opid: u32, guard: &'g Guard) -> Result<OpOutcome<'g>> {
    let _ = list.locate_pred(key, guard);
    Ok(OpOutcome::Success(None))
}
