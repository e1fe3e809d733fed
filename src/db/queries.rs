use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Draft, Vendor};

fn now() -> i64 {
    Utc::now().timestamp()
}

fn gen_id() -> String {
    Uuid::new_v4().to_string()
}

// ============ Vendors ============

pub fn create_vendor(
    conn: &Connection,
    name: &str,
    api_key_hash: &str,
    key_prefix: &str,
) -> Result<Vendor> {
    let id = gen_id();
    let now = now();

    conn.execute(
        "INSERT INTO vendors (id, name, api_key_hash, key_prefix, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![&id, name, api_key_hash, key_prefix, now],
    )?;

    Ok(Vendor {
        id,
        name: name.to_string(),
        key_prefix: key_prefix.to_string(),
        created_at: now,
    })
}

pub fn get_vendor_by_key_hash(conn: &Connection, api_key_hash: &str) -> Result<Option<Vendor>> {
    conn.query_row(
        "SELECT id, name, key_prefix, created_at FROM vendors WHERE api_key_hash = ?1",
        params![api_key_hash],
        |row| {
            Ok(Vendor {
                id: row.get(0)?,
                name: row.get(1)?,
                key_prefix: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

// ============ Drafts ============

pub fn upsert_draft(conn: &Connection, vendor_id: &str, payload: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO drafts (vendor_id, payload, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(vendor_id) DO UPDATE SET
             payload = excluded.payload,
             updated_at = excluded.updated_at",
        params![vendor_id, payload, now()],
    )?;
    Ok(())
}

pub fn get_draft(conn: &Connection, vendor_id: &str) -> Result<Option<Draft>> {
    conn.query_row(
        "SELECT vendor_id, payload, updated_at FROM drafts WHERE vendor_id = ?1",
        params![vendor_id],
        |row| {
            Ok(Draft {
                vendor_id: row.get(0)?,
                payload: row.get(1)?,
                updated_at: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

pub fn delete_draft(conn: &Connection, vendor_id: &str) -> Result<bool> {
    let affected = conn.execute("DELETE FROM drafts WHERE vendor_id = ?1", params![vendor_id])?;
    Ok(affected > 0)
}
