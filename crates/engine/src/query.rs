//! Query engine
//!
//! Full listings walk the membership set; sorted listings walk one index.
//! Either way each resolved id is materialized with the same connection.

use crate::error::{Error, Result};
use crate::scan;
use crate::store::{read_record, RecordStore};
use tablekv_core::keys::{id_from_lex_member, validate_index};
use tablekv_core::{IndexDescriptor, IndexKind, Order, Record, TableKeys};
use tablekv_storage::{ConnectionPool, KvConnection, LexRange, Limit, ScoreRange};
use tracing::{debug, warn};

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// Size of the whole collection listed, regardless of paging
    pub total: u64,
    /// Records in resolution order
    pub records: Vec<R>,
}

impl<R> Page<R> {
    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<P: ConnectionPool> RecordStore<P> {
    /// Every record of the table, in set enumeration order
    ///
    /// `total` is the membership cardinality. Fails with
    /// [`Error::NotFound`] if the table has no members.
    pub fn list_all<R: Record>(&self, table: &str) -> Result<Page<R>> {
        let keys = TableKeys::new(table)?;
        let mut conn = self.connection()?;

        let membership = keys.membership();
        let total = conn.scard(&membership)?;
        if total == 0 {
            return Err(Error::NotFound(membership));
        }

        let ids = scan::set_members(&mut *conn, &membership, self.config().scan_count)?;
        debug!(table, total, "list all");
        let records = materialize(&mut *conn, &keys, ids)?;
        Ok(Page { total, records })
    }

    /// One page of records ordered by `index`
    ///
    /// Skips `offset` entries and returns at most `limit`. Numeric indexes
    /// order by value over the full score range, ties by id; lexicographic
    /// indexes order by value bytes. `total` is the index cardinality. Fails
    /// with [`Error::NotFound`] if the index is empty.
    pub fn list_sorted<R: Record>(
        &self,
        table: &str,
        index: &IndexDescriptor,
        order: Order,
        limit: usize,
        offset: usize,
    ) -> Result<Page<R>> {
        let keys = TableKeys::new(table)?;
        validate_index(&index.name)?;
        let mut conn = self.connection()?;

        let key = keys.index(&index.name);
        let total = conn.zcard(&key)?;
        if total == 0 {
            return Err(Error::NotFound(key));
        }

        let window = Limit::new(offset, limit);
        let ids = match index.kind {
            IndexKind::Numeric => conn.zrange_by_score(&key, ScoreRange::all(), order, window)?,
            IndexKind::Lexicographic => conn
                .zrange_by_lex(&key, LexRange::all(), order, window)?
                .iter()
                .map(|member| id_from_lex_member(member).to_string())
                .collect(),
        };
        debug!(table, index = %index, ?order, limit, offset, total, page = ids.len(), "list sorted");

        let records = materialize(&mut *conn, &keys, ids)?;
        Ok(Page { total, records })
    }
}

/// Load each id in order, skipping ids whose hash has gone
fn materialize<R, C>(conn: &mut C, keys: &TableKeys, ids: Vec<String>) -> Result<Vec<R>>
where
    R: Record,
    C: KvConnection + ?Sized,
{
    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        match read_record(conn, keys, &id)? {
            Some(record) => records.push(record),
            None => warn!(table = keys.table(), id = %id, "record hash missing, skipping dangling entry"),
        }
    }
    Ok(records)
}
