/// MySQL loader for the sales dataset.
///
/// Opens one connection, runs the fixed join query once and closes the
/// connection before the rows are decoded. On every error path the
/// connection is dropped, which releases it.
///
/// Runtime queries (`sqlx::query`) are used so the crate builds without a
/// reachable database. Numeric columns are cast in SQL so their decoded
/// Rust types do not depend on the exact column definitions; this needs
/// MySQL 8.0.17 or later for `CAST(... AS DOUBLE)`.

use crate::config::DbConfig;
use crate::error::{LoadError, Result};
use crate::record::Record;
use crate::record_set::RecordSet;
use log::{debug, info, warn};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};

/// The one query the dashboard runs, in `Record` field order.
pub const SALES_QUERY: &str = "
    SELECT
        CAST(ranking_juego AS SIGNED)       AS rank_value,
        nombre_juego                        AS title,
        CAST(puntaje_critica AS DOUBLE)     AS critic_score,
        CAST(puntaje_usuario AS DOUBLE)     AS user_score,
        CAST(total_distribuido AS DOUBLE)   AS total_shipped,
        CAST(`año_juego` AS SIGNED)         AS release_year,
        nombre_plataforma                   AS platform,
        nombre_editor                       AS publisher,
        nombre_desarrollador                AS developer
    FROM juego
    JOIN desarrollador ON desarrollador_juego = ID_desarrollador
    JOIN Plataforma ON plataforma_juego = id_plataforma
    JOIN editor ON editor_juego = id_editor
    ORDER BY juego.ID_juego
";

pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

/// Run the sales query against the configured database.
pub async fn load_records(config: &DbConfig) -> Result<RecordSet> {
    debug!("Connecting to {}@{}/{}", config.user, config.host, config.database);
    load_with_options(&connect_options(config)).await
}

pub async fn load_with_options(options: &MySqlConnectOptions) -> Result<RecordSet> {
    let mut conn = MySqlConnection::connect_with(options)
        .await
        .map_err(|e| LoadError::Connection(e.to_string()))?;

    let fetched = sqlx::query(SALES_QUERY).fetch_all(&mut conn).await;

    if let Err(e) = conn.close().await {
        warn!("Closing the database connection failed: {}", e);
    }

    let rows = fetched.map_err(|e| LoadError::Query(e.to_string()))?;
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| record_from_row(index, row))
        .collect::<Result<Vec<_>>>()?;

    info!("Fetched {} sales rows", records.len());
    Ok(RecordSet::new(records))
}

/// Read configuration from the environment and load, in one step.
pub async fn load_from_env() -> Result<RecordSet> {
    let config = DbConfig::from_env()?;
    load_records(&config).await
}

fn record_from_row(index: usize, row: &MySqlRow) -> Result<Record> {
    SalesRow::decode(row)
        .map_err(|e| LoadError::InvalidRow {
            row: index,
            message: e.to_string(),
        })?
        .into_record(index)
}

/// Raw column values of one result row, before range checks.
#[derive(Debug, Clone, PartialEq)]
struct SalesRow {
    rank: i64,
    title: String,
    critic_score: Option<f64>,
    user_score: Option<f64>,
    total_shipped: f64,
    year: i64,
    platform: String,
    publisher: String,
    developer: String,
}

impl SalesRow {
    fn decode(row: &MySqlRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(SalesRow {
            rank: row.try_get("rank_value")?,
            title: row.try_get("title")?,
            critic_score: row.try_get("critic_score")?,
            user_score: row.try_get("user_score")?,
            total_shipped: row.try_get("total_shipped")?,
            year: row.try_get("release_year")?,
            platform: row.try_get("platform")?,
            publisher: row.try_get("publisher")?,
            developer: row.try_get("developer")?,
        })
    }

    fn into_record(self, index: usize) -> Result<Record> {
        let invalid = |message: String| LoadError::InvalidRow { row: index, message };

        let record = Record {
            rank: self.rank,
            title: self.title,
            critic_score: self.critic_score,
            user_score: self.user_score,
            total_shipped: self.total_shipped,
            year: checked_year(self.year).map_err(invalid)?,
            platform: self.platform,
            publisher: self.publisher,
            developer: self.developer,
        };
        record.validate().map_err(invalid)?;
        Ok(record)
    }
}

fn checked_year(year: i64) -> std::result::Result<i32, String> {
    i32::try_from(year).map_err(|_| format!("year {} out of range", year))
}
