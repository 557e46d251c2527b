// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use serde::Serialize;

use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("read", sub)) => {
            if sub.get_flag("all") {
                let n = conn.execute("UPDATE notifications SET read=1 WHERE read=0", [])?;
                println!("Marked {} notification(s) as read", n);
            } else if let Some(id) = sub.get_one::<i64>("id") {
                let n = conn.execute("UPDATE notifications SET read=1 WHERE id=?1", params![id])?;
                if n == 0 {
                    return Err(anyhow!("Notification #{} not found", id));
                }
                println!("Marked notification #{} as read", id);
            } else {
                return Err(anyhow!("Give a notification id or --all"));
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct NotificationRow {
    pub id: i64,
    pub created_at: String,
    pub category: String,
    pub title: String,
    pub message: String,
    pub read: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let unread_only = sub.get_flag("unread");
    let sql = if unread_only {
        "SELECT id, created_at, category, title, message, read FROM notifications WHERE read=0 ORDER BY created_at DESC"
    } else {
        "SELECT id, created_at, category, title, message, read FROM notifications ORDER BY created_at DESC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |r| {
        Ok(NotificationRow {
            id: r.get(0)?,
            created_at: r.get(1)?,
            category: r.get(2)?,
            title: r.get(3)?,
            message: r.get(4)?,
            read: r.get::<_, i64>(5)? != 0,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.created_at.clone(),
                    r.category.clone(),
                    r.title.clone(),
                    r.message.clone(),
                    if r.read { "read".into() } else { "new".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "At", "Category", "Title", "Message", "State"], rows)
        );
    }
    Ok(())
}
