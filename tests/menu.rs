//! Menu sessions driven by scripted input.

mod common;

use std::io::Cursor;
use std::sync::Arc;

use magazine_search::menu::Menu;
use magazine_search::ArticleRepository;

use common::{seeded_repository, InMemoryBackend};

async fn session(repository: &ArticleRepository, input: &str) -> String {
    let mut output = Vec::new();
    Menu::new(repository, Cursor::new(input.as_bytes()), &mut output)
        .run()
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_menu_lists_actions_and_exits() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "9\n").await;

    assert!(output.starts_with("1. Find authors\n2. Find issues\n"));
    assert!(output.contains("9. exit\nPlease type your option: \n"));
    assert!(output.ends_with("Thanks, bye bye.\n"));
}

#[tokio::test]
async fn test_menu_find_authors() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "1\n9\n").await;

    assert!(output.contains("Authors\nAuthor 1 (2)\nAuthor 2 (1)\nAuthor 3 (2)\n"));
}

#[tokio::test]
async fn test_menu_find_issues() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "2\n9\n").await;

    assert!(output.contains("Issues\nissue1 (2)\nissue2 (2)\nissue3 (1)\n"));
}

#[tokio::test]
async fn test_menu_articles_for_author() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "3\nAuthor 2\n9\n").await;

    assert!(output.contains("Type the name of the author:\n"));
    assert!(output.contains("Articles for author: [Author 2]\nTest Alice [15 juni 2017]\n"));
}

#[tokio::test]
async fn test_menu_articles_for_issue() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "4\nissue3\n9\n").await;

    assert!(output.contains("Articles for issue: [issue3]\nTest Christa [Author 3]\n"));
}

#[tokio::test]
async fn test_menu_search() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "5\nBob\n9\n").await;

    assert!(output.contains("Enter term to search for:\n"));
    assert!(output.contains(
        "Articles for search string: [Bob]\nTest Bob [Author 1-15 juni 2017]\n"
    ));
}

#[tokio::test]
async fn test_menu_ignores_unrecognized_input() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "seven\n6\n9\n").await;

    assert_eq!(output.matches("Please type your option:").count(), 3);
    assert!(!output.contains("Error:"));
}

#[tokio::test]
async fn test_menu_end_of_input() {
    let (_, repository) = seeded_repository().await;
    let output = session(&repository, "1\n").await;

    assert!(output.contains("Authors\n"));
    assert!(!output.contains("Thanks, bye bye."));
}

#[tokio::test]
async fn test_menu_reports_errors_and_continues() {
    let repository = ArticleRepository::new(Arc::new(InMemoryBackend::new()));
    let output = session(&repository, "1\n9\n").await;

    assert!(output.contains("Error: "));
    assert!(output.ends_with("Thanks, bye bye.\n"));
}
