//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStatus, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalog
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let status: BookStatus = book
            .status
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid book status: {}", book.status)))?;

        if self.repository.books.isbn_exists(&book.isbn).await? {
            return Err(AppError::Conflict(format!(
                "Book with ISBN {} already exists",
                book.isbn
            )));
        }

        self.repository
            .books
            .create(
                &book.title,
                &book.author,
                book.publication_date,
                &book.isbn,
                book.description.as_deref(),
                status,
            )
            .await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }
}
