//! Books API scenarios: happy path, negative, boundary, and timing probes.

use serde_json::json;
use verso_client::{api, check, Book};
use verso_fixtures::{payloads, Fixtures};
use verso_kernel::scenario::ScenarioResult;
use verso_kernel::Scenario;

use super::{create_book, scenario, Suite};
use crate::ctx::ScenarioCtx;

pub fn scenarios() -> Vec<Scenario<ScenarioCtx>> {
    vec![
        scenario!("books/list_all", [Smoke, Regression], list_all),
        scenario!("books/list_shape", [Regression], list_shape),
        scenario!("books/list_response_time", [Regression], list_response_time),
        scenario!("books/list_with_query_param", [Regression], list_with_query_param),
        scenario!("books/get_known_id", [Smoke, Regression], get_known_id),
        scenario!("books/get_unknown_id", [Regression], get_unknown_id),
        scenario!("books/get_negative_id", [Regression], get_negative_id),
        scenario!("books/create_valid", [Smoke, Regression], create_valid),
        scenario!("books/create_invalid", [Regression], create_invalid),
        scenario!("books/create_oversized", [Regression], create_oversized),
        scenario!("books/create_null_fields", [Regression], create_null_fields),
        scenario!("books/create_special_characters", [Regression], create_special_characters),
        scenario!("books/create_unicode", [Regression], create_unicode),
        scenario!("books/create_zero_page_count", [Regression], create_zero_page_count),
        scenario!("books/create_negative_page_count", [Regression], create_negative_page_count),
        scenario!("books/create_duplicate_payload", [Regression], create_duplicate_payload),
        scenario!("books/create_max_length_fields", [Regression], create_max_length_fields),
        scenario!("books/create_response_time", [Regression], create_response_time),
        scenario!("books/create_parallel_distinct_ids", [Regression], create_parallel_distinct_ids),
        scenario!("books/update_existing", [Smoke, Regression], update_existing),
        scenario!("books/update_unknown_id", [Regression], update_unknown_id),
        scenario!("books/update_invalid_data", [Regression], update_invalid_data),
        scenario!("books/update_negative_page_count", [Regression], update_negative_page_count),
        scenario!("books/update_null_fields", [Regression], update_null_fields),
        scenario!("books/update_id_mismatch", [Regression], update_id_mismatch),
        scenario!("books/update_idempotent", [Regression], update_idempotent),
        scenario!("books/update_partial_fields", [Regression], update_partial_fields),
        scenario!("books/delete_existing", [Smoke, Regression], delete_existing),
        scenario!("books/delete_unknown_id", [Regression], delete_unknown_id),
        scenario!("books/delete_negative_id", [Regression], delete_negative_id),
    ]
}

inventory::submit! {
    Suite { name: "books", scenarios }
}

async fn list_all(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.list().await?;
    check::status(&cap, 200)?;
    let books: Vec<Book> = cap.decode_list()?;
    check::that(!books.is_empty(), "expected at least one book")?;
    let first = &books[0];
    check::that(first.id > 0, "first book id should be positive")?;
    check::that(!first.title.is_empty(), "first book title should not be empty")?;
    check::that(first.page_count >= 0, "page count should be non-negative")?;
    Ok(())
}

/// Even an empty collection must come back as a JSON array.
async fn list_shape(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.list().await?;
    check::status(&cap, 200)?;
    let value = cap.json()?;
    check::that(value.is_array(), "collection response should be a JSON array")?;
    Ok(())
}

async fn list_response_time(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.list().await?;
    check::status(&cap, 200)?;
    check::elapsed_within(&cap, api::RESPONSE_TIME_CEILING)?;
    Ok(())
}

/// The service documents no filtering; an unknown parameter must not break
/// the collection endpoint.
async fn list_with_query_param(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.list_with_query("limit", "5").await?;
    check::status(&cap, 200)?;
    let books: Vec<Book> = cap.decode_list()?;
    tracing::info!(returned = books.len(), "collection size with limit=5");
    Ok(())
}

async fn get_known_id(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.get(api::VALID_BOOK_ID).await?;
    check::status(&cap, 200)?;
    let book: Book = cap.decode()?;
    check::that(
        book.id == api::VALID_BOOK_ID,
        "returned id should match the requested id",
    )?;
    check::that(!book.title.is_empty(), "book title should not be empty")?;
    check::that(
        !book.publish_date.is_empty(),
        "publish date should not be empty",
    )?;
    Ok(())
}

async fn get_unknown_id(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.get(api::UNKNOWN_ID).await?;
    check::status(&cap, 404)?;
    Ok(())
}

async fn get_negative_id(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.get(api::NEGATIVE_ID).await?;
    check::status(&cap, 400)?;
    Ok(())
}

async fn create_valid(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_valid");
    let payload = fx.book();
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    let created: Book = cap.decode()?;
    check::that(created.title == payload.title, "title should match the payload")?;
    check::that(
        created.description == payload.description,
        "description should match the payload",
    )?;
    check::that(
        created.page_count == payload.page_count,
        "page count should match the payload",
    )?;
    check::that(created.id > 0, "created book should have a positive id")?;
    Ok(())
}

async fn create_invalid(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.create(&Fixtures::invalid_book()).await?;
    check::status(&cap, 400)?;
    Ok(())
}

/// Boundary probe: the service may accept or reject, but must answer.
async fn create_oversized(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_oversized");
    let cap = ctx.books.create(&fx.oversized_book()).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

/// Explicit JSON nulls have no typed representation; sent as a raw body.
async fn create_null_fields(ctx: &ScenarioCtx) -> ScenarioResult {
    let body = json!({
        "id": 0,
        "title": null,
        "description": null,
        "pageCount": 100,
        "excerpt": null,
        "publishDate": null,
    });
    let cap = ctx
        .books
        .create_raw(body.to_string(), "application/json")
        .await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

async fn create_special_characters(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_special_characters");
    let payload = fx.book_with(
        payloads::SPECIAL_CHAR_TITLE,
        payloads::SPECIAL_CHAR_DESCRIPTION,
        150,
    );
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    let created: Book = cap.decode()?;
    check::that(
        !created.title.is_empty(),
        "title should survive special characters",
    )?;
    Ok(())
}

async fn create_unicode(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_unicode");
    let payload = fx.book_with(
        payloads::MULTIBYTE_TITLE,
        payloads::MULTIBYTE_DESCRIPTION,
        200,
    );
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    let created: Book = cap.decode()?;
    check::that(
        created.title.contains("测试"),
        "multibyte characters should be preserved",
    )?;
    Ok(())
}

async fn create_zero_page_count(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_zero_page_count");
    let payload = fx.book_with("Zero Page Book", "Description", 0);
    let cap = ctx.books.create(&payload).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

async fn create_negative_page_count(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_negative_page_count");
    let payload = fx.book_with("Negative Pages", "Description", -50);
    let cap = ctx.books.create(&payload).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

/// The service's duplicate policy is undocumented; all three outcomes are
/// documented ambiguity.
async fn create_duplicate_payload(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_duplicate_payload");
    let payload = fx.book_with("Duplicate Test", "Same description", 150);
    let first = ctx.books.create(&payload).await?;
    check::status(&first, 200)?;
    let second = ctx.books.create(&payload).await?;
    check::status_in(&second, &[200, 409, 400])?;
    Ok(())
}

async fn create_max_length_fields(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_max_length_fields");
    let payload = fx.book_with(
        format!("Maximum Length Title: {}", "x".repeat(200)),
        format!("Maximum Length Description: {}", "y".repeat(1000)),
        i32::MAX / 1000,
    );
    let cap = ctx.books.create(&payload).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

async fn create_response_time(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_response_time");
    let cap = ctx.books.create(&fx.book()).await?;
    check::status(&cap, 200)?;
    check::elapsed_within(&cap, api::RESPONSE_TIME_CEILING)?;
    Ok(())
}

/// Independent parallel creates must come back with distinct assigned ids.
async fn create_parallel_distinct_ids(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/create_parallel_distinct_ids");
    let payloads = [fx.book(), fx.book(), fx.book()];
    let (a, b, c) = tokio::join!(
        ctx.books.create(&payloads[0]),
        ctx.books.create(&payloads[1]),
        ctx.books.create(&payloads[2]),
    );

    let mut ids = Vec::new();
    for cap in [a?, b?, c?] {
        check::status(&cap, 200)?;
        let created: Book = cap.decode()?;
        check::that(created.id > 0, "created book should have a positive id")?;
        check::that(
            !ids.contains(&created.id),
            "parallel creates should yield distinct ids",
        )?;
        ids.push(created.id);
    }
    Ok(())
}

async fn update_existing(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_existing");
    let id = create_book(ctx, &fx.book()).await?;

    let update = fx
        .book_with("Updated Title", "Updated Description", 250)
        .with_id(id);
    let cap = ctx.books.update(id, &update).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/id", id)?;
    check::field_eq(&cap, "/title", "Updated Title")?;
    Ok(())
}

async fn update_unknown_id(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_unknown_id");
    let cap = ctx.books.update(api::UNKNOWN_ID, &fx.book()).await?;
    check::status(&cap, 404)?;
    Ok(())
}

async fn update_invalid_data(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_invalid_data");
    let id = create_book(ctx, &fx.book()).await?;

    let invalid = Fixtures::invalid_book().with_id(id);
    let cap = ctx.books.update(id, &invalid).await?;
    check::status(&cap, 400)?;
    Ok(())
}

async fn update_negative_page_count(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_negative_page_count");
    let id = create_book(ctx, &fx.book()).await?;

    let update = fx
        .book_with("Updated Title", "Updated Description", -100)
        .with_id(id);
    let cap = ctx.books.update(id, &update).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

async fn update_null_fields(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_null_fields");
    let id = create_book(ctx, &fx.book()).await?;

    let body = json!({
        "id": id,
        "title": null,
        "description": null,
        "pageCount": 100,
        "excerpt": null,
        "publishDate": null,
    });
    let cap = ctx.books.update_raw(id, body.to_string()).await?;
    check::status_in(&cap, &[200, 400])?;
    Ok(())
}

/// Path id and body id are forwarded independently; the server arbitrates.
async fn update_id_mismatch(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_id_mismatch");
    let id = create_book(ctx, &fx.book()).await?;

    let update = fx
        .book_with("Mismatch Test", "Description", 200)
        .with_id(id + 1000);
    let cap = ctx.books.update(id, &update).await?;
    check::status_in(&cap, &[200, 400, 409])?;
    Ok(())
}

/// Two identical PUTs must agree on the observable fields.
async fn update_idempotent(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_idempotent");
    let id = create_book(ctx, &fx.book()).await?;

    let update = fx
        .book_with("Idempotent Title", "Idempotent Description", 300)
        .with_id(id);

    let first = ctx.books.update(id, &update).await?;
    check::status(&first, 200)?;
    let second = ctx.books.update(id, &update).await?;
    check::status(&second, 200)?;

    let first: Book = first.decode()?;
    let second: Book = second.decode()?;
    check::that(
        first.title == second.title,
        "titles should match across identical updates",
    )?;
    check::that(
        first.description == second.description,
        "descriptions should match across identical updates",
    )?;
    Ok(())
}

async fn update_partial_fields(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/update_partial_fields");
    let payload = fx.book();
    let cap = ctx.books.create(&payload).await?;
    check::status(&cap, 200)?;
    let created: Book = cap.decode()?;

    let mut update = created.clone();
    update.title = "Partially Updated Title".to_string();
    update.page_count = 999;

    let cap = ctx.books.update(created.id, &update).await?;
    check::status(&cap, 200)?;
    let updated: Book = cap.decode()?;
    check::that(
        updated.title == "Partially Updated Title",
        "title should be updated",
    )?;
    check::that(updated.page_count == 999, "page count should be updated")?;
    check::that(
        updated.description == created.description,
        "untouched fields should be preserved",
    )?;
    Ok(())
}

async fn delete_existing(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("books/delete_existing");
    let id = create_book(ctx, &fx.book()).await?;

    let cap = ctx.books.delete(id).await?;
    check::status(&cap, 200)?;

    let cap = ctx.books.get(id).await?;
    check::status(&cap, 404)?;
    Ok(())
}

async fn delete_unknown_id(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.delete(api::UNKNOWN_ID).await?;
    check::status(&cap, 404)?;
    Ok(())
}

async fn delete_negative_id(ctx: &ScenarioCtx) -> ScenarioResult {
    let cap = ctx.books.delete(api::NEGATIVE_ID).await?;
    check::status(&cap, 400)?;
    Ok(())
}
