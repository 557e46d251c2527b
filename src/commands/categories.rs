// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};

use crate::utils::{category_names, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("INSERT INTO categories(name) VALUES (?1)", params![name])?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let names = category_names(conn)?;
            let rows: Vec<Vec<String>> = names.into_iter().map(|n| vec![n]).collect();
            println!("{}", pretty_table(&["Category"], rows));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
