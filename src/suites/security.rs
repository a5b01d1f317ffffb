//! Security scenarios: injection payloads sent as ordinary field values.
//!
//! The suite constructs attacks, it never executes them. Expectations follow
//! the documented service contract: reject or safely store, never fall over.

use verso_client::{check, Author, Book};
use verso_fixtures::payloads;
use verso_kernel::scenario::ScenarioResult;
use verso_kernel::Scenario;

use super::{scenario, Suite};
use crate::ctx::ScenarioCtx;

pub fn scenarios() -> Vec<Scenario<ScenarioCtx>> {
    vec![
        scenario!("security/sql_injection_book_fields", [Security, Regression], sql_injection_book_fields),
        scenario!("security/xss_book_fields", [Security, Regression], xss_book_fields),
        scenario!("security/command_injection_author", [Security, Regression], command_injection_author),
        scenario!("security/path_traversal_book", [Security, Regression], path_traversal_book),
        scenario!("security/oversized_payload_book", [Security, Regression], oversized_payload_book),
        scenario!("security/null_byte_book", [Security, Regression], null_byte_book),
        scenario!("security/header_injection_book", [Security, Regression], header_injection_book),
    ]
}

inventory::submit! {
    Suite { name: "security", scenarios }
}

async fn sql_injection_book_fields(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("security/sql_injection_book_fields");
    let payload = fx.book_with(payloads::SQL_DROP_TABLE, payloads::SQL_UPDATE_SIDE_EFFECT, 100);
    let cap = ctx.books.create(&payload).await?;
    check::status_in(&cap, &[200, 400])?;
    if cap.status().as_u16() == 200 {
        // Accepted means stored as literal text; the field must be there.
        check::field_present(&cap, "/title")?;
    }
    Ok(())
}

async fn xss_book_fields(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("security/xss_book_fields");
    let payload = fx.book_with(payloads::SCRIPT_TAG, payloads::IMG_ONERROR, 150);
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    check::body_lacks(&cap, "<script>")?;
    check::body_lacks(&cap, "onerror=")?;
    Ok(())
}

async fn command_injection_author(ctx: &ScenarioCtx) -> ScenarioResult {
    let payload = Author::new(
        1,
        payloads::SHELL_READ_PASSWD,
        payloads::SHELL_CHAINED_DELETE,
    );
    let cap = ctx.authors.create(&payload).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

async fn path_traversal_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("security/path_traversal_book");
    let payload = fx.book_with(
        payloads::PATH_TRAVERSAL_UNIX,
        payloads::PATH_TRAVERSAL_WINDOWS,
        200,
    );
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    let created: Book = cap.decode()?;
    check::that(
        !created.title.contains("../"),
        "traversal sequences should not come back verbatim",
    )?;
    Ok(())
}

/// 100k-character fields: accepted, rejected, or 413 — but never a crash.
async fn oversized_payload_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("security/oversized_payload_book");
    let flood = payloads::oversized_text(100_000);
    let payload = fx.book_with(flood.clone(), flood, i32::MAX);
    let cap = ctx.books.create(&payload).await?;
    check::status_in(&cap, &[200, 400, 413])?;
    Ok(())
}

async fn null_byte_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("security/null_byte_book");
    let payload = fx.book_with(payloads::NULL_BYTE_FILENAME, payloads::NULL_BYTE_TEXT, 100);
    let cap = ctx.books.create(&payload).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

async fn header_injection_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("security/header_injection_book");
    let payload = fx.book_with(payloads::CRLF_SET_COOKIE, payloads::LF_LOCATION, 100);
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    check::header_absent(&cap, "set-cookie")?;
    check::header_absent(&cap, "location")?;
    Ok(())
}
