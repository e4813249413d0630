/*
 * Created on Sun Feb 01 2026
 *
 * This file is a part of txset
 * txset is a collection of concurrent set data structures supporting
 * multi-operation software transactions, written by Sayan Nandan
 * ("the Author") as a successor to the transactional-linked-list
 * research prototype it is modeled on.
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

use core::{fmt, mem, ops::Deref, sync::atomic::Ordering};
use crossbeam_epoch::{Atomic as CBAtomic, CompareExchangeError, Pointable, Pointer};
// re-export here because every kernel needs the guard/owned/shared trio
pub use crossbeam_epoch::{pin as cpin, unprotected as upin, Guard, Owned, Shared};

pub(crate) const ORD_RLX: Ordering = Ordering::Relaxed;
pub(crate) const ORD_ACQ: Ordering = Ordering::Acquire;
pub(crate) const ORD_REL: Ordering = Ordering::Release;
pub(crate) const ORD_ACR: Ordering = Ordering::AcqRel;

type CxResult<'g, T, P> = Result<Shared<'g, T>, CompareExchangeError<'g, T, P>>;

pub(crate) const fn ensure_flag_align<T>(fsize: usize) {
    debug_assert!(mem::align_of::<T>().trailing_zeros() as usize >= fsize);
}

/// A thin wrapper over [`crossbeam_epoch::Atomic`] that centralizes the
/// ordering constants and the compare-exchange call shapes used across the
/// list, descriptor and node-descriptor pointers. Every low-bit tag (the
/// deletion mark on `next`, the finalized-dead mark on `nodeDesc`) is read
/// and written exclusively through this wrapper so no dereference path can
/// forget to mask it.
pub struct Atomic<T> {
    a: CBAtomic<T>,
}

impl<T> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.a)
    }
}

impl<T: Pointable> Atomic<T> {
    const _ENSURE_FLAG_STATIC_CHECK: () = ensure_flag_align::<T>(1);

    /// Instantiates a new atomic pointing at a heap-allocated `t`.
    ///
    /// **This allocates.** Callers in this crate only ever do this through
    /// a [`crate::pool::Pool`], never directly, so that allocation is
    /// capacity-checked (§4.A).
    pub fn new_alloc(t: T) -> Self {
        let _ = Self::_ENSURE_FLAG_STATIC_CHECK;
        Self {
            a: CBAtomic::new(t),
        }
    }

    #[inline(always)]
    pub const fn null() -> Self {
        Self {
            a: CBAtomic::null(),
        }
    }

    #[inline(always)]
    pub fn cx<'g, P>(
        &self,
        o: Shared<'g, T>,
        n: P,
        s: Ordering,
        f: Ordering,
        g: &'g Guard,
    ) -> CxResult<'g, T, P>
    where
        P: Pointer<T>,
    {
        self.a.compare_exchange(o, n, s, f, g)
    }

    #[inline(always)]
    pub fn cx_acr<'g, P>(&self, o: Shared<'g, T>, n: P, g: &'g Guard) -> CxResult<'g, T, P>
    where
        P: Pointer<T>,
    {
        self.cx(o, n, ORD_ACR, ORD_ACQ, g)
    }

    #[inline(always)]
    pub fn ld<'g>(&self, o: Ordering, g: &'g Guard) -> Shared<'g, T> {
        self.a.load(o, g)
    }

    #[inline(always)]
    pub fn ld_acq<'g>(&self, g: &'g Guard) -> Shared<'g, T> {
        self.ld(ORD_ACQ, g)
    }

    #[inline(always)]
    pub fn ld_rlx<'g>(&self, g: &'g Guard) -> Shared<'g, T> {
        self.ld(ORD_RLX, g)
    }

    #[inline(always)]
    pub fn st<P>(&self, n: P, o: Ordering)
    where
        P: Pointer<T>,
    {
        self.a.store(n, o)
    }
}

impl<T, A> From<A> for Atomic<T>
where
    A: Into<CBAtomic<T>>,
{
    fn from(t: A) -> Self {
        let _ = Self::_ENSURE_FLAG_STATIC_CHECK;
        Self { a: Into::into(t) }
    }
}

impl<T> Deref for Atomic<T> {
    type Target = CBAtomic<T>;
    fn deref(&self) -> &Self::Target {
        &self.a
    }
}

/// Tag bit used uniformly across this crate: set on `Node::next` to mean
/// "logically deleted", and set on `Node::node_desc` to mean "finalized
/// dead". Centralizing the literal here means the mark is never spelled
/// out as a bare `1` anywhere else.
pub const MARK: usize = 0b1;

#[inline(always)]
pub fn is_marked<'g, T>(p: Shared<'g, T>) -> bool {
    (p.tag() & MARK) != 0
}

#[inline(always)]
pub fn set_mark<'g, T>(p: Shared<'g, T>) -> Shared<'g, T> {
    p.with_tag(p.tag() | MARK)
}

#[inline(always)]
pub fn clr_mark<'g, T>(p: Shared<'g, T>) -> Shared<'g, T> {
    p.with_tag(p.tag() & !MARK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_roundtrip_on_null() {
        let guard = unsafe { upin() };
        let p: Shared<'_, u32> = Atomic::null().ld_acq(guard);
        assert!(!is_marked(p));
        let marked = set_mark(p);
        assert!(is_marked(marked));
        assert!(!is_marked(clr_mark(marked)));
        assert_eq!(clr_mark(marked), p);
    }

    #[test]
    fn atomic_cas_observes_mark() {
        let guard = unsafe { upin() };
        let a: Atomic<u32> = Atomic::new_alloc(7);
        let loaded = a.ld_acq(guard);
        assert!(a.cx_acr(loaded, set_mark(loaded), guard).is_ok());
        assert!(is_marked(a.ld_acq(guard)));
    }
}
