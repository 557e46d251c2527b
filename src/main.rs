// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use gastocheck::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, sub)?,
        Some(("sub", sub)) => commands::subscriptions::handle(&conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub)?,
        Some(("capture", sub)) => commands::capture::handle(&mut conn, sub)?,
        Some(("pending", sub)) => commands::pending::handle(&conn, sub)?,
        Some(("job", sub)) => commands::jobs::handle(&mut conn, sub)?,
        Some(("trend", sub)) => commands::snapshots::handle(&conn, sub)?,
        Some(("notify", sub)) => commands::notifications::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
