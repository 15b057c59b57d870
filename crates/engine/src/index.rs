//! Index maintainer
//!
//! Turns encoded index side values into sorted-set mutations and removes a
//! record's entries again on delete or re-insert. Writes are independent per
//! index; nothing here is atomic across indexes.

use crate::scan;
use tablekv_core::keys::{lex_member, lex_member_pattern};
use tablekv_core::{IndexDescriptor, IndexEntry, IndexKind, TableKeys};
use tablekv_storage::{KvConnection, StoreResult};
use tracing::trace;

/// Maintains the ordering structures of one table
#[derive(Debug, Clone, Copy)]
pub struct IndexMaintainer<'a> {
    keys: &'a TableKeys,
    scan_count: usize,
}

impl<'a> IndexMaintainer<'a> {
    /// Create a maintainer for the table behind `keys`
    pub fn new(keys: &'a TableKeys, scan_count: usize) -> Self {
        Self { keys, scan_count }
    }

    /// Upsert every entry into its index
    pub fn apply<C: KvConnection + ?Sized>(
        &self,
        conn: &mut C,
        entries: &[IndexEntry],
    ) -> StoreResult<()> {
        for entry in entries {
            let key = self.keys.index(&entry.index);
            conn.zadd(&key, entry.score, &entry.member)?;
            trace!(index = %key, member = %entry.member, score = entry.score, "index entry written");
        }
        Ok(())
    }

    /// Remove every entry belonging to `id` from the given indexes
    ///
    /// Numeric indexes are checked by member (`ZSCORE`), lexicographic ones by
    /// scanning for members ending in `:<id>`. Indexes without an entry for
    /// `id` are skipped. Returns the number of entries removed.
    pub fn remove<C: KvConnection + ?Sized>(
        &self,
        conn: &mut C,
        id: &str,
        indexes: &[IndexDescriptor],
    ) -> StoreResult<usize> {
        let mut removed = 0;
        for index in indexes {
            let key = self.keys.index(&index.name);
            let members = match index.kind {
                IndexKind::Numeric => match conn.zscore(&key, id)? {
                    Some(_) => vec![id.to_string()],
                    None => Vec::new(),
                },
                IndexKind::Lexicographic => {
                    scan::sorted_set_members(&mut *conn, &key, &lex_member_pattern(id), self.scan_count)?
                }
            };

            if members.is_empty() {
                trace!(index = %key, id, "no index entry to remove");
                continue;
            }
            for member in &members {
                if conn.zrem(&key, member)? {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    /// Remove the entries a previous version of `id` wrote
    ///
    /// `previous` is the hash stored before the overwrite. Members are rebuilt
    /// from it, so each index costs one `ZREM` instead of a scan. Entries that
    /// cannot be derived from `previous` are left alone.
    pub fn remove_previous<C: KvConnection + ?Sized>(
        &self,
        conn: &mut C,
        id: &str,
        indexes: &[IndexDescriptor],
        previous: &[(String, String)],
    ) -> StoreResult<usize> {
        let mut removed = 0;
        for index in indexes {
            let stored = previous.iter().rev().find(|(name, _)| *name == index.name);
            let Some((_, value)) = stored else {
                continue;
            };
            let member = match index.kind {
                IndexKind::Numeric => id.to_string(),
                IndexKind::Lexicographic => lex_member(value, id),
            };
            if conn.zrem(&self.keys.index(&index.name), &member)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
