// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finmanager::calc::ValidationMode;
use finmanager::models::{Account, Liability};
use finmanager::{cli, commands::accounts, commands::users, db, repo};
use rusqlite::Connection;

fn setup() -> (Connection, i64) {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let uid = repo::create_user(&conn, "alice").unwrap();
    (conn, uid)
}

fn liability(conn: &Connection, uid: i64, name: &str, amount: f64) -> i64 {
    let mut l = Liability::new(name, amount, uid);
    repo::save_liability(conn, &mut l, ValidationMode::Lenient).unwrap()
}

#[test]
fn new_account_has_zero_aggregates() {
    let a = Account::new("Checking", 7);
    assert_eq!(a.balance, 0.0);
    assert_eq!(a.income, 0.0);
    assert_eq!(a.expense, 0.0);
    assert_eq!(a.saving_goal, 0.0);
    assert_eq!(a.salary, 0.0);
    assert!(a.liability_ids.is_empty());
}

#[test]
fn label_includes_owner() {
    let (conn, uid) = setup();
    let user = repo::get_user(&conn, uid).unwrap().unwrap();
    let a = Account::new("Checking", uid);
    assert_eq!(a.label(&user), "Checking (alice)");
}

#[test]
fn liabilities_are_shared_between_accounts() {
    let (conn, uid) = setup();
    let rent = liability(&conn, uid, "Rent", 800.0);
    let phone = liability(&conn, uid, "Phone", 40.0);

    let mut checking = Account::new("Checking", uid);
    checking.liability_ids = vec![phone, rent, rent];
    let cid = repo::save_account(&conn, &mut checking).unwrap();
    assert_eq!(checking.liability_ids, vec![rent, phone]);

    let mut savings = Account::new("Savings", uid);
    let sid = repo::save_account(&conn, &mut savings).unwrap();
    repo::link_liability(&conn, sid, rent).unwrap();
    repo::link_liability(&conn, sid, rent).unwrap();

    assert_eq!(
        repo::get_account(&conn, cid).unwrap().unwrap().liability_ids,
        vec![rent, phone]
    );
    assert_eq!(
        repo::get_account(&conn, sid).unwrap().unwrap().liability_ids,
        vec![rent]
    );

    // Deleting a liability only drops its associations
    assert!(repo::delete_liability(&conn, rent).unwrap());
    assert_eq!(
        repo::get_account(&conn, cid).unwrap().unwrap().liability_ids,
        vec![phone]
    );
    assert!(repo::get_account(&conn, sid)
        .unwrap()
        .unwrap()
        .liability_ids
        .is_empty());

    assert!(repo::unlink_liability(&conn, cid, phone).unwrap());
    assert!(!repo::unlink_liability(&conn, cid, phone).unwrap());
}

#[test]
fn linking_unknown_liability_fails() {
    let (conn, uid) = setup();
    let mut a = Account::new("Checking", uid);
    let id = repo::save_account(&conn, &mut a).unwrap();
    assert!(repo::link_liability(&conn, id, 42).is_err());

    a.liability_ids = vec![42];
    assert!(repo::save_account(&conn, &mut a).is_err());
}

#[test]
fn aggregates_are_not_derived_from_liabilities() {
    let (conn, uid) = setup();
    let rent = liability(&conn, uid, "Rent", 800.0);
    let mut a = Account::new("Checking", uid);
    a.expense = 15.0;
    a.liability_ids = vec![rent];
    let id = repo::save_account(&conn, &mut a).unwrap();

    let loaded = repo::get_account(&conn, id).unwrap().unwrap();
    assert_eq!(loaded.expense, 15.0);
    assert_eq!(loaded, a);
}

#[test]
fn deleting_user_removes_owned_accounts() {
    let (conn, uid) = setup();
    let other = repo::create_user(&conn, "bob").unwrap();
    repo::save_account(&conn, &mut Account::new("Mine", uid)).unwrap();
    repo::save_account(&conn, &mut Account::new("Theirs", other)).unwrap();

    repo::delete_user(&conn, uid).unwrap();
    let left = repo::list_accounts(&conn, None).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Theirs");
    assert!(repo::list_accounts(&conn, Some(uid)).unwrap().is_empty());
}

#[test]
fn cli_add_set_and_link() {
    let (conn, uid) = setup();
    let rent = liability(&conn, uid, "Rent", 800.0);

    let run = |args: &[&str]| {
        let mut argv = vec!["finmanager", "account"];
        argv.extend_from_slice(args);
        let matches = cli::build_cli().get_matches_from(argv);
        if let Some(("account", am)) = matches.subcommand() {
            accounts::handle(&conn, am)
        } else {
            panic!("account command not parsed");
        }
    };

    run(&[
        "add", "--user", "alice", "--name", "Checking", "--balance", "250.5", "--salary",
        "3000",
    ])
    .unwrap();
    let acct = repo::list_accounts(&conn, Some(uid)).unwrap().remove(0);
    let id = acct.id.unwrap();
    assert_eq!(acct.balance, 250.5);
    assert_eq!(acct.salary, 3000.0);
    assert_eq!(acct.income, 0.0);

    let id_s = id.to_string();
    let rent_s = rent.to_string();
    run(&["set", &id_s, "--income", "100", "--name", "Main"]).unwrap();
    run(&["link", &id_s, &rent_s]).unwrap();
    assert!(run(&["link", &id_s, "999"]).is_err());

    let acct = repo::get_account(&conn, id).unwrap().unwrap();
    assert_eq!(acct.name, "Main");
    assert_eq!(acct.income, 100.0);
    assert_eq!(acct.balance, 250.5);
    assert_eq!(acct.liability_ids, vec![rent]);

    run(&["rm", &id_s]).unwrap();
    assert!(run(&["rm", &id_s]).is_err());
}

#[test]
fn cli_user_rm_removes_owned_records() {
    let (conn, alice) = setup();

    let run = |args: &[&str]| {
        let mut argv = vec!["finmanager", "user"];
        argv.extend_from_slice(args);
        let matches = cli::build_cli().get_matches_from(argv);
        if let Some(("user", um)) = matches.subcommand() {
            users::handle(&conn, um)
        } else {
            panic!("user command not parsed");
        }
    };

    run(&["add", "bob"]).unwrap();
    let bob = finmanager::utils::id_for_user(&conn, "bob").unwrap();
    let rent = liability(&conn, bob, "Rent", 900.0);
    let mut acct = Account::new("Joint", bob);
    acct.liability_ids = vec![rent];
    repo::save_account(&conn, &mut acct).unwrap();
    let kept = liability(&conn, alice, "Phone", 40.0);

    run(&["list"]).unwrap();
    run(&["rm", "bob"]).unwrap();

    assert!(repo::get_user(&conn, bob).unwrap().is_none());
    assert!(repo::list_accounts(&conn, Some(bob)).unwrap().is_empty());
    assert!(repo::list_liabilities(&conn, Some(bob)).unwrap().is_empty());
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM account_liabilities", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
    assert_eq!(
        repo::list_liabilities(&conn, None).unwrap()[0].id,
        Some(kept)
    );

    assert!(run(&["rm", "bob"]).is_err());
}
