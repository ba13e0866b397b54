//! Basic usage example for the Book Search library.
//!
//! Searches each provider once and then all of them together. Credentials
//! come from the usual environment variables (`book-search --env` lists
//! them); providers without credentials report an upstream error.

use book_search::config::load_config;
use book_search::models::{
    AladinSearchRequest, KakaoSearchRequest, KakaoTarget, NaverSearchRequest, NaverSort,
};
use book_search::{BooksFacade, SearchRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(None)?;
    let facade = BooksFacade::from_config(&config)?;

    let requests: Vec<SearchRequest> = vec![
        AladinSearchRequest::new("clean code").max_results(5).into(),
        KakaoSearchRequest::new("rust")
            .target(KakaoTarget::Title)
            .size(5)
            .into(),
        NaverSearchRequest::new("rust")
            .display(5)
            .sort(NaverSort::Date)
            .into(),
    ];

    for request in &requests {
        println!("Searching {} for '{}'...", request.provider(), request.query());

        match facade.search(request).await {
            Ok(result) => {
                println!(
                    "  {} of {} matches on this page",
                    result.item_count(),
                    result.total()
                );
            }
            Err(failure) => {
                eprintln!("  Error: {}", failure);
            }
        }
    }

    let unified = facade.search_all("clean code").await;
    println!(
        "\nUnified search: {} of 3 providers answered, {} books in total",
        unified.successful_count(),
        unified.total_book_count()
    );

    Ok(())
}
