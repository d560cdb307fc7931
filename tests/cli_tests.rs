mod common;
use common::{LAST_WEEK, Sandbox, THIS_WEEK, rtb};
use predicates::prelude::*;
use rtimebill::models::{InvoiceStatus, TimesheetStatus};
use std::fs;

#[test]
fn test_init_creates_sample_dataset() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("fresh.json");

    rtb(home.path())
        .args(["--data", data.to_str().unwrap(), "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization completed"));

    assert!(data.exists());
    // test mode never writes the config file
    assert!(!home.path().join(".rtimebill").join("rtimebill.conf").exists());
}

#[test]
fn test_init_writes_config_outside_test_mode() {
    let home = tempfile::tempdir().unwrap();

    rtb(home.path()).arg("init").assert().success();

    let conf = home.path().join(".rtimebill").join("rtimebill.conf");
    let content = fs::read_to_string(conf).expect("read config");
    assert!(content.contains("dataset.json"));
    assert!(content.contains("page_size: 10"));
    assert!(home.path().join(".rtimebill").join("dataset.json").exists());
}

#[test]
fn test_list_week() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["list", "--week", THIS_WEEK])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("Bob Johnson"))
        .stdout(predicate::str::contains("Michael Brown"))
        .stdout(predicate::str::contains("Page 1/1"))
        .stdout(predicate::str::contains("Missing: 2 employee(s)"));
}

#[test]
fn test_list_out_of_range_page() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["list", "--week", LAST_WEEK, "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out of range"));
}

#[test]
fn test_list_rejects_zero_page_size() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["list", "--week", THIS_WEEK, "--page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size"));
}

#[test]
fn test_list_rejects_unknown_status() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["list", "--week", THIS_WEEK, "--status", "open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));
}

#[test]
fn test_client_role_sees_own_employees_only() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["--role", "client", "--client-id", "client-1"])
        .args(["list", "--week", THIS_WEEK])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("Bob Johnson").not());
}

#[test]
fn test_client_role_requires_client_id() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["--role", "client", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--client-id is required"));
}

#[test]
fn test_missing_lists_employees_without_timesheets() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["missing", "--week", THIS_WEEK])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"))
        .stdout(predicate::str::contains("Alice Williams"))
        .stdout(predicate::str::contains("John Doe").not());
}

#[test]
fn test_submit_then_missing_shrinks() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["submit", "emp-2", THIS_WEEK, "37.5", "--comments", "short week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("submitted for emp-2"));

    let ds = sb.dataset();
    let ts = ds
        .timesheets
        .iter()
        .find(|t| t.employee_id == "emp-2" && t.week_ending.to_string() == THIS_WEEK)
        .expect("new timesheet saved");
    assert_eq!(ts.hours, 37.5);
    assert_eq!(ts.status, TimesheetStatus::Pending);

    sb.cmd()
        .args(["missing", "--week", THIS_WEEK])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith").not());
}

#[test]
fn test_submit_rejects_negative_hours() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["submit", "emp-2", THIS_WEEK, "-4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hours must be a non-negative number"));
    assert_eq!(sb.dataset().timesheets.len(), 8);
}

#[test]
fn test_submit_unknown_employee() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["submit", "emp-99", THIS_WEEK, "40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Employee 'emp-99' not found"));
}

#[test]
fn test_review_updates_status() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["review", "ts-3", "approved", "--comments", "ok"])
        .assert()
        .success();

    let ds = sb.dataset();
    let ts = ds.timesheets.iter().find(|t| t.id == "ts-3").unwrap();
    assert_eq!(ts.status, TimesheetStatus::Approved);
    assert_eq!(ts.comments.as_deref(), Some("ok"));
}

#[test]
fn test_review_rejects_bad_status_and_clients() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["review", "ts-3", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status"));

    sb.cmd()
        .args(["--role", "client", "--client-id", "client-1"])
        .args(["review", "ts-3", "approved"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only admins"));
}

#[test]
fn test_invoice_create_from_unbilled() {
    let sb = Sandbox::new();
    sb.cmd().args(["review", "ts-3", "approved"]).assert().success();

    sb.cmd()
        .args(["invoice", "create", "--client", "client-1"])
        .args(["--from", "2023-03-18", "--to", THIS_WEEK])
        .assert()
        .success()
        .stdout(predicate::str::contains("total $2,100.00"));

    let ds = sb.dataset();
    assert_eq!(ds.invoices.len(), 4);
    let inv = ds.invoices.last().unwrap();
    assert_eq!(inv.client_id, "client-1");
    assert_eq!(inv.timesheets, vec!["ts-3".to_string()]);
    assert_eq!(inv.status, InvoiceStatus::Draft);
}

#[test]
fn test_invoice_create_with_nothing_to_bill() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["invoice", "create", "--client", "client-1"])
        .args(["--from", "2023-03-11", "--to", LAST_WEEK])
        .assert()
        .success()
        .stdout(predicate::str::contains("No unbilled"));
    assert_eq!(sb.dataset().invoices.len(), 3);
}

#[test]
fn test_invoice_create_refuses_another_clients_timesheet() {
    let sb = Sandbox::new();
    // ts-8 is Michael Brown's, who works for client-3
    sb.cmd()
        .args(["invoice", "create", "--client", "client-1"])
        .args(["--from", "2023-03-18", "--to", THIS_WEEK])
        .args(["--timesheet", "ts-8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("belongs to client client-3"));
    assert_eq!(sb.dataset().invoices.len(), 3);
}

#[test]
fn test_invoice_status_and_list() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["invoice", "status", "inv-3", "paid"])
        .assert()
        .success();

    let ds = sb.dataset();
    let inv = ds.invoices.iter().find(|i| i.id == "inv-3").unwrap();
    assert_eq!(inv.status, InvoiceStatus::Paid);

    sb.cmd()
        .args(["invoice", "status", "inv-9", "paid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invoice 'inv-9' not found"));

    sb.cmd()
        .args(["--role", "client", "--client-id", "client-2", "invoice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inv-2"))
        .stdout(predicate::str::contains("inv-1").not());
}

#[test]
fn test_invoice_pdf_written_to_out_dir() {
    let sb = Sandbox::new();
    let out = sb.path("out");

    sb.cmd()
        .args(["invoice", "pdf", "inv-2", "--out-dir", out.to_str().unwrap()])
        .args(["--notes", "Net 30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF export completed"));

    let bytes = fs::read(out.join("invoice-globex-industries-2.pdf")).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_invoice_pdf_hidden_from_other_clients() {
    let sb = Sandbox::new();
    let out = sb.path("out");

    sb.cmd()
        .args(["--role", "client", "--client-id", "client-2"])
        .args(["invoice", "pdf", "inv-1", "--out-dir", out.to_str().unwrap()])
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn test_export_json_week() {
    let sb = Sandbox::new();
    let out = sb.path("week.json");

    sb.cmd()
        .args(["export", "--week", LAST_WEEK, "--format", "json"])
        .args(["--file", out.to_str().unwrap(), "--status", "approved"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(4));
    assert!(content.contains("Acme Corporation"));
    assert!(!content.contains("ts-5"));
}

#[test]
fn test_export_csv_requires_absolute_path() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["export", "--week", THIS_WEEK, "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_export_csv_overwrite_with_force() {
    let sb = Sandbox::new();
    let out = sb.path("week.csv");
    fs::write(&out, "stale").unwrap();

    sb.cmd()
        .args(["export", "--week", THIS_WEEK, "--file", out.to_str().unwrap(), "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("id,employee_id,employee"));
    assert!(content.contains("ts-8"));
}
