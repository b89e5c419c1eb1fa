//! Shared test infrastructure.
//!
//! # Helpers
//! - `workbook_bytes()` - build an in-memory xlsx with arbitrary headers/cells
//! - `sample_items()` - a small program with mixed details
//! - `test_app!` - an actix test service wired like `main`

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

use eventscript::models::program::EventItem;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ENTRANCE_LABELS: [&str; 6] =
    ["개식사", "국민의례", "학교장 환영사", "신입생 선서", "교가 제창", "폐식사"];

pub const FULL_HEADER: [&str; 3] = ["순서", "소요시간(분)", "세부사항"];

// ============================================================================
// SPREADSHEETS
// ============================================================================

/// One cell of a hand-built test workbook.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// Build an xlsx workbook with `header` in row 1 and `rows` below it.
pub fn workbook_bytes(header: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).expect("write header");
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(r, col, *s).expect("write text");
                }
                Cell::Number(n) => {
                    sheet.write_number(r, col, *n).expect("write number");
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().expect("save workbook")
}

pub fn sample_items() -> Vec<EventItem> {
    vec![
        EventItem::new("개회식", 10, "사회자 인사"),
        EventItem::new("기조강연", 40, ""),
        EventItem::new("질의응답", 15, "마이크 2개 준비"),
    ]
}

pub fn labels(items: &[EventItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

// ============================================================================
// HTTP
// ============================================================================

/// Initialize an actix test service with session middleware and the given
/// workspace store, completion client and generation limiter.
#[macro_export]
macro_rules! test_app {
    ($store:expr, $client:expr, $limiter:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::generate(),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::new($store))
                .app_data(actix_web::web::Data::new($client))
                .app_data(actix_web::web::Data::new($limiter))
                .configure(eventscript::handlers::routes),
        )
        .await
    };
}
