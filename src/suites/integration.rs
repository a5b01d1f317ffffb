//! Cross-entity scenarios: book/author relationships, bulk flows, and
//! boundary probes. Every scenario arranges its own data; the sequential
//! steps inside a scenario are the only ordering that exists.

use std::time::{Duration, Instant};

use verso_client::{api, check, Author};
use verso_fixtures::Fixtures;
use verso_kernel::scenario::ScenarioResult;
use verso_kernel::Scenario;

use super::{create_author, create_book, scenario, Suite};
use crate::ctx::ScenarioCtx;

pub fn scenarios() -> Vec<Scenario<ScenarioCtx>> {
    vec![
        scenario!("integration/book_with_new_author", [Integration, Regression], book_with_new_author),
        scenario!("integration/shared_book_two_authors", [Integration, Regression], shared_book_two_authors),
        scenario!("integration/delete_book_with_live_author", [Integration, Regression], delete_book_with_live_author),
        scenario!("integration/author_first_then_rebind", [Integration, Regression], author_first_then_rebind),
        scenario!("integration/book_update_keeps_author_reference", [Integration, Regression], book_update_keeps_author_reference),
        scenario!("integration/author_rebind_between_books", [Integration, Regression], author_rebind_between_books),
        scenario!("integration/three_authors_one_book", [Integration, Regression], three_authors_one_book),
        scenario!("integration/author_delete_keeps_book", [Integration, Regression], author_delete_keeps_book),
        scenario!("integration/dangling_reference_probes", [Integration, Regression], dangling_reference_probes),
        scenario!("integration/bulk_create_pairs", [Integration, Regression], bulk_create_pairs),
        scenario!("integration/parallel_authors_one_book", [Integration, Regression], parallel_authors_one_book),
        scenario!("integration/partial_failure_integrity", [Integration, Regression], partial_failure_integrity),
        scenario!("integration/relationship_boundary_ids", [Integration, Regression], relationship_boundary_ids),
        scenario!("integration/cross_entity_unknown_updates", [Integration, Regression], cross_entity_unknown_updates),
    ]
}

inventory::submit! {
    Suite { name: "integration", scenarios }
}

async fn book_with_new_author(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/book_with_new_author");
    let book_id = create_book(ctx, &fx.book()).await?;

    let cap = ctx.authors.create(&Author::new(book_id, "John", "Doe")).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/idBook", book_id)?;
    check::field_eq(&cap, "/firstName", "John")?;
    check::field_eq(&cap, "/lastName", "Doe")?;
    Ok(())
}

async fn shared_book_two_authors(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/shared_book_two_authors");
    let book_id = create_book(ctx, &fx.book()).await?;

    let first = ctx
        .authors
        .create(&Author::new(book_id, "Author1", "LastName1"))
        .await?;
    let second = ctx
        .authors
        .create(&Author::new(book_id, "Author2", "LastName2"))
        .await?;

    check::status(&first, 200)?;
    check::status(&second, 200)?;
    check::field_eq(&first, "/idBook", book_id)?;
    check::field_eq(&second, "/idBook", book_id)?;
    Ok(())
}

/// Cascade behavior is undocumented upstream: assert the book is gone and
/// record what happened to the author instead of guessing.
async fn delete_book_with_live_author(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/delete_book_with_live_author");
    let book_id = create_book(ctx, &fx.book()).await?;
    let author_id = create_author(ctx, &Author::new(book_id, "TestAuthor", "TestLastName")).await?;

    let cap = ctx.books.delete(book_id).await?;
    check::status(&cap, 200)?;

    let cap = ctx.books.get(book_id).await?;
    check::status(&cap, 404)?;

    let cap = ctx.authors.get(author_id).await?;
    tracing::info!(
        status = cap.status().as_u16(),
        "author status after deleting its book"
    );
    Ok(())
}

async fn author_first_then_rebind(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/author_first_then_rebind");
    let author_id =
        create_author(ctx, &Author::new(1, "AuthorFirst", "LastNameFirst")).await?;
    let book_id = create_book(ctx, &fx.book()).await?;

    let update = Author::new(book_id, "AuthorFirst", "LastNameFirst").with_id(author_id);
    let cap = ctx.authors.update(author_id, &update).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/idBook", book_id)?;
    check::field_eq(&cap, "/firstName", "AuthorFirst")?;
    Ok(())
}

async fn book_update_keeps_author_reference(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/book_update_keeps_author_reference");
    let book_id = create_book(ctx, &fx.book()).await?;
    let author_id = create_author(ctx, &Author::new(book_id, "UpdateTest", "Author")).await?;

    let update = fx
        .book_with("Updated Title", "Updated Description", 999)
        .with_id(book_id);
    let cap = ctx.books.update(book_id, &update).await?;
    check::status(&cap, 200)?;

    let cap = ctx.authors.get(author_id).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/idBook", book_id)?;

    let cap = ctx.books.get(book_id).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/title", "Updated Title")?;
    Ok(())
}

async fn author_rebind_between_books(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/author_rebind_between_books");
    let first_book = create_book(ctx, &fx.book_with("Book 1", "First Book", 100)).await?;
    let second_book = create_book(ctx, &fx.book_with("Book 2", "Second Book", 200)).await?;

    let author_id =
        create_author(ctx, &Author::new(first_book, "Reference", "UpdateTest")).await?;

    let update = Author::new(second_book, "Reference", "UpdateTest").with_id(author_id);
    let cap = ctx.authors.update(author_id, &update).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/idBook", second_book)?;

    // Both books survive the rebind.
    check::status(&ctx.books.get(first_book).await?, 200)?;
    check::status(&ctx.books.get(second_book).await?, 200)?;
    Ok(())
}

async fn three_authors_one_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/three_authors_one_book");
    let book_id = create_book(ctx, &fx.book()).await?;

    let mut author_ids = Vec::new();
    for first_name in ["First", "Second", "Third"] {
        let id = create_author(ctx, &Author::new(book_id, first_name, "Author")).await?;
        author_ids.push(id);
    }

    let cap = ctx.books.get(book_id).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/id", book_id)?;

    for id in author_ids {
        let cap = ctx.authors.get(id).await?;
        check::status(&cap, 200)?;
        check::field_eq(&cap, "/idBook", book_id)?;
    }
    Ok(())
}

async fn author_delete_keeps_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/author_delete_keeps_book");
    let book_id = create_book(ctx, &fx.book()).await?;
    let author_id = create_author(ctx, &Author::new(book_id, "ToDelete", "Author")).await?;

    let cap = ctx.authors.delete(author_id).await?;
    check::status(&cap, 200)?;

    check::status(&ctx.authors.get(author_id).await?, 404)?;

    let cap = ctx.books.get(book_id).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/id", book_id)?;
    Ok(())
}

/// Documents how the service treats references to unknown and deleted books;
/// no enforced rule exists to assert against.
async fn dangling_reference_probes(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/dangling_reference_probes");

    let cap = ctx
        .authors
        .create(&Author::new(api::UNKNOWN_ID, "Invalid", "Book"))
        .await?;
    tracing::info!(
        status = cap.status().as_u16(),
        "author create against an unknown book id"
    );

    let book_id = create_book(ctx, &fx.book()).await?;
    let author_id = create_author(ctx, &Author::new(book_id, "Valid", "Author")).await?;
    check::status(&ctx.books.delete(book_id).await?, 200)?;

    let update = Author::new(book_id, "Updated", "Author").with_id(author_id);
    let cap = ctx.authors.update(author_id, &update).await?;
    tracing::info!(
        status = cap.status().as_u16(),
        "author update referencing a deleted book"
    );
    Ok(())
}

async fn bulk_create_pairs(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/bulk_create_pairs");
    let started = Instant::now();

    for (i, book) in fx.books(5).into_iter().enumerate() {
        let book_id = create_book(ctx, &book).await?;
        let author = Author::new(book_id, format!("Author{i}"), format!("LastName{i}"));
        create_author(ctx, &author).await?;
    }

    let total = started.elapsed();
    check::that(
        total < Duration::from_secs(30),
        format!("bulk pairs should finish within 30s, took {}ms", total.as_millis()),
    )?;
    Ok(())
}

async fn parallel_authors_one_book(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/parallel_authors_one_book");
    let book_id = create_book(ctx, &fx.book()).await?;

    let payloads = [
        Author::new(book_id, "Concurrent0", "Author0"),
        Author::new(book_id, "Concurrent1", "Author1"),
        Author::new(book_id, "Concurrent2", "Author2"),
    ];
    let (a, b, c) = tokio::join!(
        ctx.authors.create(&payloads[0]),
        ctx.authors.create(&payloads[1]),
        ctx.authors.create(&payloads[2]),
    );

    for cap in [a?, b?, c?] {
        check::status(&cap, 200)?;
        check::field_eq(&cap, "/idBook", book_id)?;
    }

    let cap = ctx.books.get(book_id).await?;
    check::status(&cap, 200)?;
    Ok(())
}

/// An invalid sibling write must not damage previously created rows.
async fn partial_failure_integrity(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/partial_failure_integrity");
    let book_id = create_book(ctx, &fx.book()).await?;
    let author_id = create_author(ctx, &Author::new(book_id, "Success", "Author")).await?;

    let mut broken = Fixtures::invalid_author();
    broken.id_book = book_id;
    let cap = ctx.authors.create(&broken).await?;
    tracing::info!(
        status = cap.status().as_u16(),
        "invalid sibling author create"
    );

    let cap = ctx.authors.get(author_id).await?;
    check::status(&cap, 200)?;
    check::field_eq(&cap, "/idBook", book_id)?;

    check::status(&ctx.books.get(book_id).await?, 200)?;
    Ok(())
}

async fn relationship_boundary_ids(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/relationship_boundary_ids");
    let book_id = create_book(ctx, &fx.book()).await?;

    // Practical many-authors limit: all ten may succeed, but at least one must.
    let mut successes = 0;
    for i in 0..10 {
        let author = Author::new(book_id, format!("BoundaryAuthor{i}"), format!("Test{i}"));
        let cap = ctx.authors.create(&author).await?;
        if cap.status().as_u16() == 200 {
            check::field_eq(&cap, "/idBook", book_id)?;
            successes += 1;
        }
    }
    tracing::info!(successes, "authors created against one book");
    check::that(successes > 0, "at least one author per book should be accepted")?;

    let cap = ctx.authors.create(&Author::new(0, "Zero", "BookId")).await?;
    tracing::info!(status = cap.status().as_u16(), "author create with idBook 0");

    let cap = ctx
        .authors
        .create(&Author::new(i32::MAX, "MaxInt", "BookId"))
        .await?;
    tracing::info!(
        status = cap.status().as_u16(),
        "author create with idBook i32::MAX"
    );
    Ok(())
}

async fn cross_entity_unknown_updates(ctx: &ScenarioCtx) -> ScenarioResult {
    let mut fx = ctx.fixtures("integration/cross_entity_unknown_updates");

    let cap = ctx.books.update(api::UNKNOWN_ID, &fx.book()).await?;
    check::status(&cap, 404)?;

    let cap = ctx.authors.update(api::UNKNOWN_ID, &fx.author()).await?;
    check::status(&cap, 404)?;
    Ok(())
}
