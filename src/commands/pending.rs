// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

use crate::utils::pretty_table;

/// Parks an utterance the interpreter could not price, so nothing the user
/// said is lost.
pub fn store(conn: &Connection, raw_text: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO pending_captures(raw_text) VALUES (?1)",
        params![raw_text],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let mut stmt = conn
                .prepare("SELECT id, created_at, raw_text FROM pending_captures ORDER BY id")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (id, at, text) = row?;
                data.push(vec![id.to_string(), at, text]);
            }
            println!("{}", pretty_table(&["Id", "At", "Text"], data));
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM pending_captures WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("Pending capture #{} not found", id));
            }
            println!("Discarded pending capture #{}", id);
        }
        _ => {}
    }
    Ok(())
}
