use chrono::Local;
use rusqlite::params;

use crate::db::connection::Database;
use crate::domain::stats::current_period;
use crate::reports::financial::period_label;
use crate::router::handle;
use crate::tests::utils::*;

fn seed_repair(db: &Database, created_at: &str, make: &str, displacement: &str) {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into repairs (created_at, first_name, last_name, phone, make, displacement, notes)
            values (?1, 'Juan', 'Pérez', '3512345678', ?2, ?3, '')
            "#,
            params![created_at, make, displacement],
        )
        .unwrap();
        Ok(())
    })
    .unwrap();
}

fn seed_estimate(db: &Database, created_at: &str, labor: f64, parts: f64) {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into repairs (created_at, first_name, last_name, phone, make, displacement, notes)
            values (?1, 'Juan', 'Pérez', '3512345678', 'Honda', '250cc', '')
            "#,
            params![created_at],
        )
        .unwrap();
        let repair_id = conn.last_insert_rowid();
        conn.execute(
            r#"
            insert into estimates (repair_id, work_description, labor_cost, parts_cost, total, sent, sent_at, created_at)
            values (?1, 'Trabajo', ?2, ?3, ?4, 1, ?5, ?5)
            "#,
            params![repair_id, labor, parts, labor + parts, created_at],
        )
        .unwrap();
        Ok(())
    })
    .unwrap();
}

#[test]
fn stats_page_renders_counts_and_groupings() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let today = Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string();
    seed_repair(&db, &today, "Honda", "250cc");
    seed_repair(&db, &today, "Honda", "110cc");
    seed_repair(&db, "2020-01-15T10:00:00", "Yamaha", "250cc");

    let mut resp = handle(get_as("/stats?period=general", &cookie), &db).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);

    assert!(body.contains("Honda"));
    assert!(body.contains("Yamaha"));
    assert!(body.contains("250cc"));
    // Most-popular insight picks the larger group.
    assert!(body.contains("Marca más popular"));
}

#[test]
fn financial_summary_respects_the_selected_period() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    seed_estimate(&db, "2024-01-15T10:00:00", 15000.0, 5000.0);
    seed_estimate(&db, "2024-02-10T10:00:00", 8000.0, 0.0);

    let mut resp = handle(get_as("/stats?period=2024-01", &cookie), &db).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("$ 20.000"));
    assert!(body.contains("$ 15.000"));

    let mut resp = handle(get_as("/stats?period=general", &cookie), &db).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("$ 28.000"));
}

#[test]
fn period_selector_defaults_to_the_current_month() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let mut resp = handle(get_as("/stats", &cookie), &db).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);

    // The current month is offered and selected even with no data in it.
    let current = current_period(Local::now().naive_local());
    assert!(body.contains(&format!("value=\"{current}\" selected")));
    assert!(body.contains(&period_label(&current)));
    // Empty selection still renders a zero-valued summary.
    assert!(body.contains("$ 0"));
}

#[test]
fn report_downloads_with_the_deterministic_filename() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    seed_estimate(&db, "2024-01-15T10:00:00", 15000.0, 5000.0);

    let mut resp = handle(get_as("/stats/report?period=2024-01", &cookie), &db).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Type").contains("spreadsheetml"));
    assert!(header(&resp, "Content-Disposition").contains("report-2024-01.xlsx"));
    assert!(!body_bytes(&mut resp).is_empty());

    let mut resp = handle(get_as("/stats/report?period=general", &cookie), &db).unwrap();
    assert!(header(&resp, "Content-Disposition").contains("report-general.xlsx"));
    assert!(!body_bytes(&mut resp).is_empty());
}

#[test]
fn zero_data_report_is_still_a_valid_download() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let mut resp = handle(get_as("/stats/report", &cookie), &db).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Disposition").contains("report-general.xlsx"));
    assert!(!body_bytes(&mut resp).is_empty());
}
