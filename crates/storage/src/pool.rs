//! Connection pooling with scoped acquisition
//!
//! A [`Pooled`] guard owns one connection for the duration of an operation
//! and hands it back to its pool when dropped, on success and error paths
//! alike.

use crate::connection::KvConnection;
use crate::error::StoreResult;
use std::ops::{Deref, DerefMut};

/// A pool of store connections
///
/// Implementations decide how connections are created, limited, and reused.
/// Callers go through [`ConnectionPool::acquire`].
pub trait ConnectionPool: Send + Sync {
    /// Connection type handed out by the pool
    type Connection: KvConnection;

    /// Take a connection out of the pool, creating one if needed
    fn checkout(&self) -> StoreResult<Self::Connection>;

    /// Return a connection previously handed out by [`checkout`](Self::checkout)
    fn checkin(&self, conn: Self::Connection);

    /// Acquire a connection that returns itself to the pool on drop
    fn acquire(&self) -> StoreResult<Pooled<'_, Self>>
    where
        Self: Sized,
    {
        let conn = self.checkout()?;
        Ok(Pooled {
            pool: self,
            conn: Some(conn),
        })
    }
}

/// A connection on loan from a [`ConnectionPool`]
pub struct Pooled<'a, P: ConnectionPool> {
    pool: &'a P,
    // Only `None` inside `drop`.
    conn: Option<P::Connection>,
}

impl<P: ConnectionPool> Deref for Pooled<'_, P> {
    type Target = P::Connection;

    fn deref(&self) -> &Self::Target {
        match &self.conn {
            Some(conn) => conn,
            None => unreachable!("pooled connection used after release"),
        }
    }
}

impl<P: ConnectionPool> DerefMut for Pooled<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.conn {
            Some(conn) => conn,
            None => unreachable!("pooled connection used after release"),
        }
    }
}

impl<P: ConnectionPool> Drop for Pooled<'_, P> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.checkin(conn);
        }
    }
}

impl<P: ConnectionPool> std::fmt::Debug for Pooled<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pooled")
            .field("held", &self.conn.is_some())
            .finish()
    }
}
