// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{cli, commands, db, session::Session, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut session = Session::open(conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data file ready at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&mut session, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
