//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{Book, BookPayload},
    AppState,
};

use super::JsonOrForm;

/// Confirmation body for write operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    /// Id of the created book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_books().await?;
    tracing::info!("fetched {} books", books.len());
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = MessageResponse),
        (status = 400, description = "Invalid book data", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<BookPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let book = state.services.books.add_book(&payload).await?;
    tracing::info!(id = book.id, title = %book.title, "added new book");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "book created successfully".to_string(),
            id: Some(book.id),
        }),
    ))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_book_by_id(id).await?;
    tracing::info!(id, title = %book.title, "fetched book");
    Ok(Json(book))
}

/// Partially update a book; only supplied fields are written
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Invalid book data", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    JsonOrForm(payload): JsonOrForm<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update_book(id, &payload).await?;
    tracing::info!(id, "updated book");

    Ok(Json(MessageResponse {
        message: "book updated successfully".to_string(),
        id: None,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book(id).await?;
    tracing::info!(id, "deleted book");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request},
        response::Response,
        Router,
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        api::create_router,
        models::BookChanges,
        repository::books::MockBookStore,
        services::{books::BookService, urls::UrlService, Services},
        AppState,
    };

    use super::*;

    fn app(store: MockBookStore) -> Router {
        create_router(AppState {
            services: Arc::new(Services {
                books: BookService::new(Arc::new(store)),
                urls: UrlService::new("www.byfood.com"),
            }),
        })
    }

    fn sample(id: i32) -> Book {
        Book {
            id,
            title: "Domain-Driven Design".to_string(),
            author: "Eric Evans".to_string(),
            cover_image_url: Some("https://covers.openlibrary.org/b/isbn/9780321125217-L.jpg".to_string()),
            description: None,
            publication_date: NaiveDate::from_ymd_opt(2003, 8, 30).unwrap(),
            number_of_pages: 560,
            isbn: "9780321125217".to_string(),
        }
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        };
        app.oneshot(request.unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_books() {
        let mut store = MockBookStore::new();
        store.expect_list().returning(|| Ok(vec![sample(1), sample(2)]));

        let response = send(app(store), Method::GET, "/books", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["publication_date"], "2003-08-30");
    }

    #[tokio::test]
    async fn test_list_books_empty_is_array() {
        let mut store = MockBookStore::new();
        store.expect_list().returning(|| Ok(Vec::new()));

        let response = send(app(store), Method::GET, "/books", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_book_from_form() {
        let mut store = MockBookStore::new();
        store
            .expect_create()
            .withf(|book| book.number_of_pages == 560 && book.description.is_none())
            .returning(|_| Ok(sample(11)));

        let form = "title=Domain-Driven+Design&author=Eric+Evans&cover_image_url=&description=\
                    &publication_date=2003-08-30&number_of_pages=560&isbn=9780321125217";
        let request = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();

        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["message"], "book created successfully");
        assert_eq!(body["id"], 11);
    }

    #[tokio::test]
    async fn test_create_book_validation_error() {
        let mut store = MockBookStore::new();
        store.expect_create().never();

        let response = send(
            app(store),
            Method::POST,
            "/books",
            Some(json!({ "title": "X", "author": "Eric Evans" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(
            body["violations"],
            json!([
                { "field": "title", "rule": "length" },
                { "field": "publication_date", "rule": "required" },
                { "field": "number_of_pages", "rule": "required" },
                { "field": "isbn", "rule": "required" }
            ])
        );
    }

    #[tokio::test]
    async fn test_create_book_malformed_body() {
        let store = MockBookStore::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "invalid request body");
    }

    #[tokio::test]
    async fn test_get_book() {
        let mut store = MockBookStore::new();
        store.expect_get_by_id().returning(|id| Ok(sample(id)));

        let response = send(app(store), Method::GET, "/books/4", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], 4);
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut store = MockBookStore::new();
        store
            .expect_get_by_id()
            .returning(|id| Err(AppError::NotFound(format!("Book {} not found", id))));

        let response = send(app(store), Method::GET, "/books/404", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let mut store = MockBookStore::new();
        store.expect_get_by_id().never();

        let response = send(app(store), Method::GET, "/books/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let mut store = MockBookStore::new();
        store
            .expect_get_by_id()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let response = send(app(store), Method::GET, "/books/1", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], "Database error");
    }

    #[tokio::test]
    async fn test_update_book() {
        let mut store = MockBookStore::new();
        store
            .expect_update()
            .withf(|id, changes| {
                *id == 2
                    && *changes
                        == BookChanges {
                            title: Some("ok".to_string()),
                            ..BookChanges::default()
                        }
            })
            .returning(|_, _| Ok(()));

        let response = send(app(store), Method::PUT, "/books/2", Some(json!({ "title": "ok" }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "book updated successfully");
    }

    #[tokio::test]
    async fn test_update_book_empty_body() {
        let mut store = MockBookStore::new();
        store.expect_update().never();

        let response = send(app(store), Method::PUT, "/books/2", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["violations"],
            json!([{ "field": "body", "rule": "at_least_one_field_required" }])
        );
    }

    #[tokio::test]
    async fn test_update_book_zero_pages_only() {
        let mut store = MockBookStore::new();
        store.expect_update().never();

        let response = send(app(store), Method::PUT, "/books/2", Some(json!({ "number_of_pages": 0 }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["violations"],
            json!([{ "field": "body", "rule": "at_least_one_field_required" }])
        );
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let mut store = MockBookStore::new();
        store
            .expect_update()
            .returning(|id, _| Err(AppError::NotFound(format!("Book {} not found", id))));

        let response = send(app(store), Method::PUT, "/books/9", Some(json!({ "isbn": "9780321125217" }))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let mut store = MockBookStore::new();
        store.expect_delete().returning(|_| Ok(()));

        let response = send(app(store), Method::DELETE, "/books/3", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
