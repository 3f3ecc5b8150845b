use std::collections::HashMap;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use astra::{Body, Request, ResponseBuilder};
use chrono::{Local, NaiveDateTime};

use crate::auth::cookies::{clear_session_cookie, cookie_value, session_cookie, SESSION_COOKIE};
use crate::auth::password::{sign_in, sign_up};
use crate::auth::remember::{self, RememberedLogin};
use crate::auth::sessions::{create_session, load_user_from_session, revoke_session, SESSION_TTL_SECS};
use crate::db::connection::Database;
use crate::db::{estimates, repairs};
use crate::domain::estimate::{CostEstimate, NewEstimate};
use crate::domain::repair::{NewRepairJob, RepairJob};
use crate::domain::stats;
use crate::errors::ServerError;
use crate::messaging::whatsapp;
use crate::reports::financial::compose_financial_report;
use crate::responses::{
    html_response, see_other, see_other_with_cookies, xlsx_response, ResultResp,
};
use crate::templates::pages;

pub fn handle(mut req: Request, db: &Database) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(&req, db),
        ("GET", "/static/main.css") => stylesheet(),

        ("GET", "/login") => show_login(&req, db),
        ("POST", "/login") => do_login(&mut req, db),
        ("POST", "/register") => do_register(&mut req, db),
        ("POST", "/logout") => do_logout(&req, db),

        ("GET", "/repairs") => repairs_index(&req, db),
        ("GET", "/repairs/new") => show_repair_form(&req, db),
        ("POST", "/repairs") => create_repair(&mut req, db),
        ("POST", "/repairs/delete") => delete_repair(&mut req, db),
        ("GET", "/repairs/notes") => show_notes(&req, db),
        ("POST", "/repairs/notes") => save_notes(&mut req, db),
        ("POST", "/repairs/ready") => mark_ready(&mut req, db),
        ("GET", "/repairs/estimate") => show_estimate_form(&req, db),
        ("POST", "/repairs/estimate") => create_estimate(&mut req, db),

        ("GET", "/stats") => stats_view(&req, db),
        ("GET", "/stats/report") => stats_report(&req, db),

        _ => Err(ServerError::NotFound),
    }
}

// ---------- auth ----------

fn home(req: &Request, db: &Database) -> ResultResp {
    if signed_in_user(req, db)?.is_some() {
        see_other("/repairs")
    } else {
        see_other("/login")
    }
}

fn show_login(req: &Request, db: &Database) -> ResultResp {
    if signed_in_user(req, db)?.is_some() {
        return see_other("/repairs");
    }
    let remembered = remember::read(cookie_header(req));
    html_response(pages::login::login_page(&remembered, None))
}

fn do_login(req: &mut Request, db: &Database) -> ResultResp {
    let form = read_form(req)?;
    let email = field(&form, "email").to_string();
    let password = field(&form, "password").to_string();
    let remember_opt_in = field(&form, "remember") == "true";

    let result = db.with_conn(|conn| sign_in(conn, &email, &password, now_unix()));

    match result {
        Ok(signed) => {
            let mut cookies = vec![session_cookie(&signed.session_token, SESSION_TTL_SECS)];
            // The preference is rewritten on every successful sign-in,
            // whichever way the box was ticked.
            if remember_opt_in {
                cookies.extend(remember::set_cookies(&signed.email));
            } else {
                cookies.extend(remember::clear_cookies());
            }
            see_other_with_cookies("/repairs", &cookies)
        }
        Err(ServerError::Unauthorized(msg)) | Err(ServerError::BadRequest(msg)) => {
            let remembered = RememberedLogin {
                email,
                opted_in: remember_opt_in,
            };
            html_response(pages::login::login_page(&remembered, Some(&msg)))
        }
        Err(e) => Err(e),
    }
}

fn do_register(req: &mut Request, db: &Database) -> ResultResp {
    let form = read_form(req)?;
    let email = field(&form, "email").to_string();
    let password = field(&form, "password").to_string();

    let result = db.with_conn(|conn| {
        let user_id = sign_up(conn, &email, &password, now_unix())?;
        create_session(conn, user_id, now_unix())
    });

    match result {
        Ok(token) => {
            see_other_with_cookies("/repairs", &[session_cookie(&token, SESSION_TTL_SECS)])
        }
        Err(ServerError::BadRequest(msg)) => {
            let remembered = RememberedLogin::default();
            html_response(pages::login::login_page(&remembered, Some(&msg)))
        }
        Err(e) => Err(e),
    }
}

fn do_logout(req: &Request, db: &Database) -> ResultResp {
    if let Some(token) = session_token(req) {
        db.with_conn(|conn| revoke_session(conn, &token, now_unix()))?;
    }
    see_other_with_cookies("/login", &[clear_session_cookie()])
}

// ---------- repairs ----------

fn repairs_index(req: &Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let (repair_list, estimate_list) = db.with_conn(|conn| {
        Ok((repairs::list_repairs(conn)?, estimates::list_estimates(conn)?))
    })?;

    let mut by_repair: HashMap<i64, CostEstimate> = HashMap::new();
    for estimate in estimate_list {
        by_repair.entry(estimate.repair_id).or_insert(estimate);
    }

    html_response(pages::repairs::repairs_page(&repair_list, &by_repair))
}

fn show_repair_form(req: &Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };
    html_response(pages::repair_form::new_repair_page(
        None,
        &NewRepairJob::default(),
    ))
}

fn create_repair(req: &mut Request, db: &Database) -> ResultResp {
    let Some((user_id, _)) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let form = read_form(req)?;
    let input = NewRepairJob {
        first_name: field(&form, "first_name").to_string(),
        last_name: field(&form, "last_name").to_string(),
        phone: field(&form, "phone").to_string(),
        make: field(&form, "make").to_string(),
        displacement: field(&form, "displacement").to_string(),
        notes: field(&form, "notes").to_string(),
        user_id: Some(user_id),
    };

    let required = [
        &input.first_name,
        &input.last_name,
        &input.phone,
        &input.make,
        &input.displacement,
    ];
    if required.iter().any(|value| value.is_empty()) {
        return html_response(pages::repair_form::new_repair_page(
            Some("Por favor completá los campos obligatorios"),
            &input,
        ));
    }

    db.with_conn(|conn| repairs::insert_repair(conn, &input, now_local()))?;
    see_other("/repairs")
}

fn delete_repair(req: &mut Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let form = read_form(req)?;
    let id = id_field(&form)?;

    db.with_conn(|conn| repairs::delete_repair(conn, id))?;
    see_other("/repairs")
}

fn show_notes(req: &Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let id = id_param(req)?;
    let job = load_repair(db, id)?;
    html_response(pages::notes_form::notes_page(&job))
}

fn save_notes(req: &mut Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let form = read_form(req)?;
    let id = id_field(&form)?;
    let notes = field(&form, "private_notes").to_string();
    let notes = if notes.is_empty() { None } else { Some(notes) };

    db.with_conn(|conn| repairs::set_private_notes(conn, id, notes.as_deref()))?;
    see_other("/repairs")
}

fn mark_ready(req: &mut Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let form = read_form(req)?;
    let id = id_field(&form)?;

    db.with_conn(|conn| repairs::mark_ready(conn, id, now_local()))?;

    let job = load_repair(db, id)?;
    whatsapp_handoff(req, &job, &whatsapp::ready_notice(&job))
}

// ---------- estimates ----------

fn show_estimate_form(req: &Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let id = id_param(req)?;
    let job = load_repair(db, id)?;

    // One estimate per repair; the form disappears once it exists.
    let existing = db.with_conn(|conn| estimates::find_estimate_for_repair(conn, id))?;
    if existing.is_some() {
        return see_other("/repairs");
    }

    html_response(pages::estimate_form::estimate_page(&job, None, "", "", ""))
}

fn create_estimate(req: &mut Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let form = read_form(req)?;
    let id = id_field(&form)?;
    let job = load_repair(db, id)?;

    let existing = db.with_conn(|conn| estimates::find_estimate_for_repair(conn, id))?;
    if existing.is_some() {
        return see_other("/repairs");
    }

    let description = field(&form, "work_description").to_string();
    let labor_raw = field(&form, "labor_cost");
    let parts_raw = field(&form, "parts_cost");

    let labor = labor_raw.parse::<f64>();
    if description.is_empty() || labor.is_err() {
        return html_response(pages::estimate_form::estimate_page(
            &job,
            Some("Por favor completá los campos obligatorios"),
            &description,
            labor_raw,
            parts_raw,
        ));
    }

    let input = NewEstimate {
        repair_id: id,
        work_description: description,
        labor_cost: labor.unwrap_or(0.0),
        parts_cost: parts_raw.parse::<f64>().unwrap_or(0.0),
    };

    db.with_conn(|conn| estimates::insert_estimate(conn, &input, now_local()))?;

    let stored = db
        .with_conn(|conn| estimates::find_estimate_for_repair(conn, id))?
        .ok_or(ServerError::InternalError)?;

    let message = whatsapp::estimate_message(&job, &stored);
    whatsapp_handoff(req, &job, &message)
}

// ---------- statistics ----------

fn stats_view(req: &Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let now = now_local();
    let selected = selected_period(req, Some(now));

    let (repair_list, estimate_list) = db.with_conn(|conn| {
        Ok((repairs::list_repairs(conn)?, estimates::list_estimates(conn)?))
    })?;

    let counts = stats::count_repairs(&repair_list, now);
    let summary = stats::summarize_finances(&estimate_list, selected.as_deref());

    let mut periods = stats::available_periods(&estimate_list);
    let current = stats::current_period(now);
    if !periods.contains(&current) {
        periods.insert(0, current);
    }

    html_response(pages::stats::stats_page(
        &counts,
        &summary,
        &periods,
        selected.as_deref(),
    ))
}

fn stats_report(req: &Request, db: &Database) -> ResultResp {
    let Some(_user) = signed_in_user(req, db)? else {
        return see_other("/login");
    };

    let selected = selected_period(req, None);

    let estimate_list = db.with_conn(|conn| estimates::list_estimates(conn))?;
    let summary = stats::summarize_finances(&estimate_list, selected.as_deref());
    let report = compose_financial_report(&summary, selected.as_deref())?;

    xlsx_response(report.bytes, &report.filename)
}

/// Period selection from the query string. `"general"` is the all-time
/// sentinel; on the stats page (and only there) a missing parameter falls
/// back to the current calendar month.
fn selected_period(req: &Request, default_now: Option<NaiveDateTime>) -> Option<String> {
    let query = parse_query(req);
    match query.get("period").map(String::as_str) {
        Some("general") => None,
        Some(key) if !key.is_empty() => Some(key.to_string()),
        _ => default_now.map(stats::current_period),
    }
}

// ---------- plumbing ----------

fn stylesheet() -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_CSS_UTF_8.as_ref())
        .body(Body::from(include_str!("../static/main.css")))
        .map_err(|_| ServerError::InternalError)
}

fn whatsapp_handoff(req: &Request, job: &RepairJob, message: &str) -> ResultResp {
    let recipient = whatsapp::normalize_recipient(&job.phone);
    let url = whatsapp::send_url(&recipient, message);

    if whatsapp::is_touch_agent(user_agent(req)) {
        // Direct navigation lets the installed app claim the link.
        see_other(&url)
    } else {
        html_response(pages::send::send_page(&url, &job.customer_name()))
    }
}

fn load_repair(db: &Database, id: i64) -> Result<RepairJob, ServerError> {
    db.with_conn(|conn| repairs::get_repair(conn, id))?
        .ok_or(ServerError::NotFound)
}

fn signed_in_user(req: &Request, db: &Database) -> Result<Option<(i64, String)>, ServerError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    db.with_conn(|conn| load_user_from_session(conn, &token, now_unix()))
}

fn session_token(req: &Request) -> Option<String> {
    cookie_header(req)
        .and_then(|header| cookie_value(header, SESSION_COOKIE))
        .map(str::to_string)
}

fn cookie_header(req: &Request) -> Option<&str> {
    req.headers().get("Cookie").and_then(|v| v.to_str().ok())
}

fn user_agent(req: &Request) -> &str {
    req.headers()
        .get("User-Agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|_| ServerError::BadRequest("unreadable form body".into()))?;

    Ok(url::form_urlencoded::parse(&buf).into_owned().collect())
}

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> &'a str {
    form.get(name).map(String::as_str).unwrap_or("").trim()
}

fn id_field(form: &HashMap<String, String>) -> Result<i64, ServerError> {
    field(form, "id")
        .parse()
        .map_err(|_| ServerError::BadRequest("missing repair id".into()))
}

fn id_param(req: &Request) -> Result<i64, ServerError> {
    parse_query(req)
        .get("id")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ServerError::BadRequest("missing repair id".into()))
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// The single ambient clock read; everything below the router takes this as
/// an explicit parameter.
fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}
