//! Splitroom - split a restaurant bill with friends
//!
//! Command-line front end over the core: create a room from a receipt, share
//! the code, record everyone's selections, and print the per-person split.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splitroom_core::{
    split_bill, BillSplit, Database, FixtureExtractor, Result, RoomManager,
};

mod config;

const USAGE: &str = "\
Usage: splitroom <command> [args]

Commands:
  demo                                   run a complete fixture session
  create <host> <room_name> <people>     create a room (fixture receipt)
  join <code> <name>                     join an existing room
  submit <code> <name> [item ...]        submit a selection
  status <code>                          show room progress
  force-complete <code> <host>           finalize stragglers (host only)
  results <code>                         compute and print the split
  delete <code>                          delete a room";

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return Ok(());
    };

    let config = config::AppConfig::load()?;
    let manager = RoomManager::new(Database::open(&config.db_path)?);

    match (command.as_str(), &args[1..]) {
        ("demo", _) => demo(&manager),
        ("create", [host, room_name, people]) => {
            let num_people: u32 = people.parse().unwrap_or(1).max(1);
            let (code, room) = manager.create_room_from_image(
                host,
                room_name,
                num_people,
                &FixtureExtractor,
                &[],
            )?;
            println!("Room '{}' created, code {code}", room.room_name);
            for item in &room.items {
                println!("  {}  {}", item.name, item.price);
            }
            Ok(())
        }
        ("join", [code, name]) => {
            let room = manager.join_room(code, name)?;
            println!(
                "{name} joined '{}' ({}/{} participants)",
                room.room_name,
                room.users.len(),
                room.num_people
            );
            Ok(())
        }
        ("submit", [code, name, items @ ..]) => {
            manager.submit_selection(code, name, items.to_vec())?;
            println!("Selection recorded for {name}");
            Ok(())
        }
        ("status", [code]) => {
            let status = manager.status(code)?;
            println!(
                "{}/{} joined, {} submitted{}",
                status.total_users,
                status.expected_people,
                status.submitted_count,
                if status.ready_to_proceed {
                    " - ready"
                } else {
                    ""
                }
            );
            for user in &status.users {
                let mark = if status.submitted_users.contains(user) {
                    "x"
                } else {
                    " "
                };
                println!("  [{mark}] {user}");
            }
            Ok(())
        }
        ("force-complete", [code, host]) => {
            manager.force_complete(code, host)?;
            println!("All participants finalized");
            Ok(())
        }
        ("results", [code]) => {
            let room = manager.room(code)?;
            print_split(&split_bill(&room));
            Ok(())
        }
        ("delete", [code]) => {
            if manager.delete_room(code)? {
                println!("Room deleted");
            } else {
                println!("No such room");
            }
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            Ok(())
        }
    }
}

/// Scripted end-to-end session against the fixture receipt
fn demo(manager: &RoomManager<Database>) -> Result<()> {
    let (code, room) =
        manager.create_room_from_image("Alice", "Team dinner", 2, &FixtureExtractor, &[])?;
    println!("Created room {code} from receipt ({} items)", room.items.len());

    manager.join_room(&code, "Bob")?;
    manager.submit_selection(
        &code,
        "Alice",
        vec!["Dal Tadka".into(), "Garlic Nan".into()],
    )?;
    manager.submit_selection(
        &code,
        "Bob",
        vec!["Garlic Nan".into(), "Kaju Paneer (A)".into()],
    )?;

    let room = manager.room(&code)?;
    print_split(&split_bill(&room));
    manager.delete_room(&code)?;
    Ok(())
}

fn print_split(split: &BillSplit) {
    for (user, share) in &split.user_breakdown {
        println!("{user}: {:.2} ({:.1}% of the bill)", share.final_amount, share.percentage);
        println!(
            "    items {:.2}  service {:.2}  cgst {:.2}  sgst {:.2}  discount -{:.2}",
            share.item_total, share.service_charge, share.cgst, share.sgst, share.discount
        );
    }
    println!(
        "total {:.2} (claimed {:.2}, service {:.2}, taxes {:.2}, discount {:.2})",
        split.totals.grand_total,
        split.totals.subtotal,
        split.totals.service_charge,
        split.totals.cgst + split.totals.sgst,
        split.totals.discount
    );
}
