//! Cursor scan loops
//!
//! Each helper keeps calling the store until it hands back cursor 0, so the
//! result is complete no matter how the store pages its replies.

use tablekv_storage::{KvConnection, StoreResult};

/// Every key matching `pattern` (`SCAN ... MATCH`)
pub fn keys<C: KvConnection + ?Sized>(
    conn: &mut C,
    pattern: &str,
    count: usize,
) -> StoreResult<Vec<String>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    loop {
        let page = conn.scan(cursor, Some(pattern), count)?;
        out.extend(page.items);
        if page.cursor == 0 {
            return Ok(out);
        }
        cursor = page.cursor;
    }
}

/// Every member of the set at `key` (`SSCAN`)
pub fn set_members<C: KvConnection + ?Sized>(
    conn: &mut C,
    key: &str,
    count: usize,
) -> StoreResult<Vec<String>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    loop {
        let page = conn.sscan(key, cursor, count)?;
        out.extend(page.items);
        if page.cursor == 0 {
            return Ok(out);
        }
        cursor = page.cursor;
    }
}

/// Every sorted-set member at `key` matching `pattern` (`ZSCAN ... MATCH`)
pub fn sorted_set_members<C: KvConnection + ?Sized>(
    conn: &mut C,
    key: &str,
    pattern: &str,
    count: usize,
) -> StoreResult<Vec<String>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    loop {
        let page = conn.zscan(key, cursor, Some(pattern), count)?;
        out.extend(page.items.into_iter().map(|(member, _)| member));
        if page.cursor == 0 {
            return Ok(out);
        }
        cursor = page.cursor;
    }
}
