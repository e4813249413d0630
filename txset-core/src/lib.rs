/*
 * Created on Sun Feb 01 2026
 *
 * This file is a part of txset
 * txset is a collection of concurrent set data structures supporting
 * multi-operation software transactions, written by Sayan Nandan
 * ("the Author").
 *
 * Copyright (c) 2026, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! A lock-free transactional linked-list set.
//!
//! Multiple threads submit transactions — arbitrary sequences of
//! `find`/`insert`/`delete` operations over `u32` keys — and the list
//! guarantees each either commits in full or leaves no trace, with no
//! lock ever held across a thread suspension. Threads that run into a
//! concurrent transaction's unfinished work help drive it to completion
//! instead of blocking on it; see [`list::List`] for the entry point and
//! the module docs on [`ops`] for the operation kernels themselves.
//!
//! Reclamation is intentionally simple: every [`Node`](node::Node),
//! [`Desc`](desc::Desc) and `NodeDesc`(nodedesc::NodeDesc) record is
//! handed out by a bounded [`pool::Pool`] and never freed for the life
//! of the program, which is what makes it sound for one thread to keep
//! reading a pointer another thread is mid-CAS on.

pub mod desc;
pub mod error;
mod help;
pub mod list;
pub mod metrics;
mod node;
mod nodedesc;
mod ops;
pub mod pool;
mod sync;

pub use desc::{DescBuilder, OpKind, Status};
pub use error::{Error, Result};
pub use list::List;
pub use metrics::MetricsSnapshot;
pub use pool::PoolKind;
