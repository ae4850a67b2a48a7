//! SQL query constants
//!
//! Contains all SQL queries used by the application. Numeric parameters carry
//! explicit casts so the driver binds them the same way whatever integer or
//! numeric width the columns were declared with.

/// Page through movies in id order
pub const LIST_MOVIES: &str = r#"
    SELECT movie_id, title, release_year, duration_minutes, plot_summary,
           rating::float8 AS rating
    FROM movies
    ORDER BY movie_id
    LIMIT $1 OFFSET $2
"#;

pub const GET_MOVIE: &str = r#"
    SELECT movie_id, title, release_year, duration_minutes, plot_summary,
           rating::float8 AS rating
    FROM movies
    WHERE movie_id = $1
"#;

/// One movie with its genre names folded into a comma-joined column
pub const GET_MOVIE_WITH_GENRES: &str = r#"
    SELECT m.movie_id, m.title, m.release_year, m.duration_minutes, m.plot_summary,
           m.rating::float8 AS rating,
           string_agg(g.name, ',' ORDER BY g.name) AS genres
    FROM movies m
    LEFT JOIN movie_genres mg ON m.movie_id = mg.movie_id
    LEFT JOIN genres g ON mg.genre_id = g.genre_id
    WHERE m.movie_id = $1
    GROUP BY m.movie_id, m.title, m.release_year, m.duration_minutes, m.plot_summary, m.rating
"#;

/// Title search; `$1` is a pattern built by [`contains_pattern`]
pub const SEARCH_MOVIES: &str = r#"
    SELECT movie_id, title, release_year, duration_minutes, plot_summary,
           rating::float8 AS rating
    FROM movies
    WHERE title ILIKE $1
    ORDER BY movie_id
"#;

pub const MOVIES_BY_GENRE: &str = r#"
    SELECT m.movie_id, m.title, m.release_year, m.duration_minutes, m.plot_summary,
           m.rating::float8 AS rating
    FROM movies m
    JOIN movie_genres mg ON m.movie_id = mg.movie_id
    WHERE mg.genre_id = $1
    ORDER BY m.movie_id
"#;

pub const INSERT_MOVIE: &str = r#"
    INSERT INTO movies (title, release_year, duration_minutes, plot_summary, rating)
    VALUES ($1, $2::int4, $3::int4, $4, $5::float8)
    RETURNING movie_id
"#;

pub const UPDATE_MOVIE: &str = r#"
    UPDATE movies
    SET title = $1,
        release_year = $2::int4,
        duration_minutes = $3::int4,
        plot_summary = $4,
        rating = $5::float8
    WHERE movie_id = $6
"#;

pub const DELETE_MOVIE: &str = "DELETE FROM movies WHERE movie_id = $1";

pub const LIST_GENRES: &str = r#"
    SELECT genre_id, name, description
    FROM genres
    ORDER BY genre_id
"#;

pub const GET_GENRE: &str = r#"
    SELECT genre_id, name, description
    FROM genres
    WHERE genre_id = $1
"#;

pub const INSERT_GENRE: &str = r#"
    INSERT INTO genres (name, description)
    VALUES ($1, $2)
    RETURNING genre_id
"#;

/// Users, public columns only
pub const LIST_USERS: &str = r#"
    SELECT user_id, username, email, is_active, created_at::timestamptz AS created_at
    FROM users
    ORDER BY user_id
"#;

pub const GET_USER: &str = r#"
    SELECT user_id, username, email, is_active, created_at::timestamptz AS created_at
    FROM users
    WHERE user_id = $1
"#;

pub const REVIEWS_BY_USER: &str = r#"
    SELECT r.review_id, r.movie_id, r.user_id, r.rating, r.review_text,
           m.title AS movie_title
    FROM reviews r
    JOIN movies m ON r.movie_id = m.movie_id
    WHERE r.user_id = $1
    ORDER BY r.review_id
"#;

pub const LIST_REVIEWS: &str = r#"
    SELECT r.review_id, r.movie_id, r.user_id, r.rating, r.review_text,
           u.username, m.title AS movie_title
    FROM reviews r
    JOIN users u ON r.user_id = u.user_id
    JOIN movies m ON r.movie_id = m.movie_id
    ORDER BY r.review_id
"#;

pub const REVIEWS_BY_MOVIE: &str = r#"
    SELECT r.review_id, r.movie_id, r.user_id, r.rating, r.review_text,
           u.username
    FROM reviews r
    JOIN users u ON r.user_id = u.user_id
    WHERE r.movie_id = $1
    ORDER BY r.review_id
"#;

pub const INSERT_REVIEW: &str = r#"
    INSERT INTO reviews (movie_id, user_id, rating, review_text)
    VALUES ($1::int4, $2::int4, $3::int4, $4)
    RETURNING review_id
"#;

/// Wrap a search term as `%term%` with LIKE metacharacters escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
