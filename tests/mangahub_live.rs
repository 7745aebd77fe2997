#![allow(clippy::ignore_without_reason)]
//! Smoke tests against the live API. Run with `cargo test -- --ignored`.

use mangahub::platform::mangahub::{Client, Status, errors::ClientError};

const MANGA_ID: &str = "red-storm_123";

#[tokio::test]
#[ignore]
async fn manga_details() -> Result<(), ClientError> {
    let client = Client::new()?;

    let details = client.manga_details(&[MANGA_ID]).await?;
    let manga = details.first().expect("one id should yield one manga");

    assert_eq!(MANGA_ID, manga.id());
    assert_eq!("Red Storm", manga.title());
    assert_eq!(
        Some("https://thumb.mghubcdn.com/mn/red-storm.jpg"),
        manga.image()
    );
    assert_eq!(Status::Ongoing, manga.status());
    assert_eq!(Some("Cyungchan Noh"), manga.author());
    assert!(manga.description().is_some_and(|desc| !desc.is_empty()));

    Ok(())
}

#[tokio::test]
#[ignore]
async fn chapters_and_pages() -> Result<(), ClientError> {
    let client = Client::new()?;

    let chapters = client.chapters(MANGA_ID).await?;
    let Some(chapter) = chapters.first() else {
        panic!("`{MANGA_ID}` should have chapters");
    };

    assert!(chapter.number() >= 0.0);
    assert!(chapter.published().is_some());

    let details = client.chapter_details(MANGA_ID, chapter.id()).await?;
    assert_eq!(MANGA_ID, details.manga_id());
    assert!(!details.pages().is_empty());
    assert!(
        details
            .pages()
            .iter()
            .all(|page| page.starts_with("https://img.mghubcdn.com/"))
    );

    Ok(())
}

#[tokio::test]
#[ignore]
async fn search() -> Result<(), ClientError> {
    let client = Client::new()?;

    let results = client.search("red storm").await?;
    let Some(hit) = results.results().iter().find(|hit| hit.id() == MANGA_ID) else {
        panic!("searching `red storm` should find `{MANGA_ID}`");
    };

    assert_eq!("Red Storm", hit.title());
    assert_eq!(
        Some("https://thumb.mghubcdn.com/mn/red-storm.jpg"),
        hit.image()
    );

    Ok(())
}

#[tokio::test]
#[ignore]
async fn home_sections() -> Result<(), ClientError> {
    let client = Client::new()?;

    let sections = client.home_sections().await?;
    assert_eq!(1, sections.len());
    assert_eq!("Latest", sections[0].title());

    Ok(())
}
