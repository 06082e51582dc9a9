//! Sample database for trying the browser out.
//!
//! Five related tables with a few dozen rows. Every insert carries an explicit
//! primary key and uses `INSERT OR IGNORE`, so seeding twice is harmless.

use crate::error::TriptychError;
use chrono::{Duration, NaiveDate};
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use std::path::Path;
use tracing::info;

pub const DEMO_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    age INTEGER,
    registration_date DATE
);

CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT
);

CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    department_id INTEGER,
    salary REAL,
    hire_date DATE,
    FOREIGN KEY (department_id) REFERENCES departments (id)
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    price REAL,
    category TEXT
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY,
    user_id INTEGER,
    product_id INTEGER,
    quantity INTEGER,
    order_date DATE,
    total REAL,
    FOREIGN KEY (user_id) REFERENCES users (id),
    FOREIGN KEY (product_id) REFERENCES products (id)
);
"#;

const USER_NAMES: [&str; 10] = [
    "Ivan Ivanov",
    "Maria Smirnova",
    "Alexey Popov",
    "Elena Kuznetsova",
    "Dmitry Volkov",
    "Olga Morozova",
    "Andrey Novikov",
    "Tatiana Lebedeva",
    "Sergey Zaitsev",
    "Natalia Vlasova",
];

const DEPARTMENTS: [(&str, &str); 5] = [
    ("IT", "Moscow"),
    ("Sales", "Saint Petersburg"),
    ("HR", "Yekaterinburg"),
    ("Finance", "Nizhny Novgorod"),
    ("Marketing", "Kazan"),
];

const PRODUCTS: [(&str, f64, &str); 10] = [
    ("Laptop", 50000.0, "Electronics"),
    ("Mouse", 1000.0, "Electronics"),
    ("Keyboard", 2500.0, "Electronics"),
    ("Chair", 8000.0, "Furniture"),
    ("Desk", 15000.0, "Furniture"),
    ("Book", 500.0, "Books"),
    ("Phone", 30000.0, "Electronics"),
    ("Tablet", 25000.0, "Electronics"),
    ("Kettle", 3000.0, "Appliances"),
    ("Toaster", 2000.0, "Appliances"),
];

const EMPLOYEES: i64 = 15;
const ORDERS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub tables: usize,
    pub inserted: u64,
}

/// Create (if needed) and fill the demo database at `path`.
pub async fn seed(path: &Path) -> Result<SeedSummary, TriptychError> {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&opts).await?;

    // sqlx::query runs one statement at a time.
    let mut tables = 0;
    for stmt in DEMO_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut conn).await?;
        tables += 1;
    }

    let mut tx = conn.begin().await?;
    let mut inserted = 0;

    for (i, name) in USER_NAMES.iter().enumerate() {
        let id = i as i64 + 1;
        inserted += sqlx::query(
            "INSERT OR IGNORE INTO users (id, name, email, age, registration_date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(*name)
        .bind(format!("user{id}@example.com"))
        .bind(20 + (id * 7) % 41)
        .bind(demo_date(2023, id))
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for (i, (name, location)) in DEPARTMENTS.iter().enumerate() {
        inserted += sqlx::query(
            "INSERT OR IGNORE INTO departments (id, name, location) VALUES (?, ?, ?)",
        )
        .bind(i as i64 + 1)
        .bind(*name)
        .bind(*location)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for (i, (name, price, category)) in PRODUCTS.iter().enumerate() {
        inserted += sqlx::query(
            "INSERT OR IGNORE INTO products (id, name, price, category) VALUES (?, ?, ?, ?)",
        )
        .bind(i as i64 + 1)
        .bind(*name)
        .bind(*price)
        .bind(*category)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for id in 1..=EMPLOYEES {
        let salary = 30000.0 + ((id * 7919) % 120_000) as f64 + 0.5;
        inserted += sqlx::query(
            "INSERT OR IGNORE INTO employees (id, name, department_id, salary, hire_date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(format!("Employee {id}"))
        .bind(1 + id % DEPARTMENTS.len() as i64)
        .bind(salary)
        .bind(demo_date(2020, id))
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for id in 1..=ORDERS {
        let user_id = 1 + id % USER_NAMES.len() as i64;
        let product_idx = (id * 3) as usize % PRODUCTS.len();
        let quantity = 1 + id % 5;
        let total = PRODUCTS[product_idx].1 * quantity as f64;
        inserted += sqlx::query(
            "INSERT OR IGNORE INTO orders (id, user_id, product_id, quantity, order_date, total) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(product_idx as i64 + 1)
        .bind(quantity)
        .bind(demo_date(2024, id))
        .bind(total)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    conn.close().await?;

    info!(path = %path.display(), tables, inserted, "demo database seeded");
    Ok(SeedSummary { tables, inserted })
}

/// A stable `YYYY-MM-DD` date inside `year`, spread out by row id.
fn demo_date(year: i32, id: i64) -> String {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
    (start + Duration::days((id * 37) % 365))
        .format("%Y-%m-%d")
        .to_string()
}
