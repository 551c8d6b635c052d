//! Use-case flows through the public API with the in-memory repository

use std::sync::Arc;

use bookshelf_core::model::{validate_for_year, BookChanges, NewBook};
use bookshelf_core::repo::InMemoryBookRepository;
use bookshelf_core::{Book, BookService, ServiceError};
use rust_decimal::Decimal;
use uuid::Uuid;

fn service() -> BookService {
    BookService::new(Arc::new(InMemoryBookRepository::new()))
}

fn dune() -> NewBook {
    NewBook {
        title: "Dune".into(),
        price: Decimal::new(1250, 2),
        publication_year: 1965,
    }
}

#[tokio::test]
async fn dune_scenario() {
    let svc = service();

    let created = svc.create(dune()).await.unwrap();
    assert!(!created.id.is_nil());

    let fetched = svc
        .get_by_id_or_title(&created.id.to_string())
        .await
        .unwrap()
        .expect("created book is readable");
    assert_eq!(
        fetched,
        Book {
            id: created.id,
            title: "Dune".into(),
            price: Decimal::new(1250, 2),
            publication_year: 1965,
        }
    );
}

#[tokio::test]
async fn concurrent_creates_all_land() {
    let svc = service();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.create(NewBook {
                    title: format!("Volume {i}"),
                    price: Decimal::new(i, 0),
                    publication_year: 2000,
                })
                .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task panicked").expect("create failed");
    }

    assert_eq!(svc.count().await.unwrap(), 16);
    assert_eq!(svc.get_all(None).await.unwrap().len(), 16);
}

#[tokio::test]
async fn update_after_delete_is_not_found() {
    let svc = service();
    let created = svc.create(dune()).await.unwrap();
    assert!(svc.delete(created.id).await.unwrap());

    let err = svc
        .update(
            created.id,
            BookChanges {
                title: "Dune".into(),
                price: Decimal::ONE,
                publication_year: 1965,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == created.id));
}

#[test]
fn every_offending_field_is_reported() {
    let book = Book {
        id: Uuid::nil(),
        title: String::new(),
        price: Decimal::ZERO,
        publication_year: 2100,
    };
    let fields: Vec<_> = validate_for_year(&book, 2026)
        .iter()
        .map(|v| v.field())
        .collect();
    assert_eq!(fields, ["id", "title", "publicationYear"]);
}
