//! FIX client example: persistent connection, one order, decoded replies.
//!
//! Configure via environment variables:
//! `FIX_HOST`, `FIX_PORT`, `FIX_SENDER`, `FIX_TARGET`.

use ferrofix::prelude::*;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let host = env::var("FIX_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("FIX_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(9876);
    let sender = env::var("FIX_SENDER").unwrap_or_else(|_| "CLIENT".to_string());
    let target = env::var("FIX_TARGET").unwrap_or_else(|_| "SERVER".to_string());

    let registry = Arc::new(FieldRegistry::standard());
    let session_config = SessionConfig::new(
        CompId::new(&sender).ok_or("sender too long")?,
        CompId::new(&target).ok_or("target too long")?,
        FixVersion::Fix44,
    )
    .with_heartbeat_interval(Duration::from_secs(30));

    let (connector_events_tx, mut connector_events_rx) = mpsc::unbounded_channel();
    let (sessions_tx, mut sessions_rx) = mpsc::channel(1);

    let connector = PersistentConnector::new(
        ConnectorConfig::new(host, port),
        session_config,
        Arc::clone(&registry),
    )
    .with_events(connector_events_tx);

    tokio::spawn(async move {
        while let Some(event) = connector_events_rx.recv().await {
            info!(?event, "connector");
        }
    });
    tokio::spawn(async move {
        if let Err(err) = connector.run(sessions_tx).await {
            error!(error = %err, "connector stopped");
        }
    });

    let Some(mut session) = sessions_rx.recv().await else {
        return Err("no session established".into());
    };
    info!("session up, sending order");

    session
        .send(
            Message::new(MsgType::NewOrderSingle)
                .with(Field::str(11, "ORD-1"))
                .with(Field::char(21, '1'))
                .with(Field::str(55, "BTC-USD"))
                .with(Field::new(54, FieldValue::Side(Side::Buy)))
                .with(Field::timestamp(60, UtcTimestamp::now()))
                .with(Field::decimal(38, rust_decimal::Decimal::ONE))
                .with(Field::new(40, FieldValue::OrdType(OrdType::Market))),
        )
        .await?;

    for _ in 0..3 {
        match session.recv().await {
            Some(inbound) => info!(
                msg_type = %inbound.message.msg_type(),
                duplicate = inbound.duplicate,
                "received"
            ),
            None => break,
        }
    }

    let reason = session.close().await;
    info!(%reason, "done");
    Ok(())
}
