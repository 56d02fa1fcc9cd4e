//! Canned insight provider
//!
//! Stands in for a real BI backend: resolves locally after a fixed delay
//! with one of three hard-coded response shapes chosen uniformly at random.
//! No network request is ever dispatched.

use crate::error::Result;
use crate::session::{Message, TablePayload};
use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use std::time::Duration;

use super::base::ResponseProvider;

/// The three mutually exclusive assistant payload forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Long-form insight/recommendation copy
    Text,
    /// Declarative chart specification with a fixed time series
    Chart,
    /// Header+rows product table
    Table,
}

/// Provider that simulates a BI backend with canned responses
///
/// The delay models round-trip latency; it always resolves, so there is no
/// timeout or cancellation path.
pub struct CannedInsightProvider {
    delay: Duration,
    fixed_shape: Option<ResponseShape>,
}

impl CannedInsightProvider {
    /// Create a provider with the given simulated latency
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fixed_shape: None,
        }
    }

    /// Pin the response shape instead of choosing at random
    ///
    /// Useful for deterministic tests and demos.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use genbi::providers::{CannedInsightProvider, ResponseShape};
    ///
    /// let provider = CannedInsightProvider::new(Duration::ZERO)
    ///     .with_shape(ResponseShape::Table);
    /// ```
    pub fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.fixed_shape = Some(shape);
        self
    }

    fn pick_shape(&self) -> ResponseShape {
        if let Some(shape) = self.fixed_shape {
            return shape;
        }
        let mut rng = rand::rng();
        match rng.random_range(0..3) {
            0 => ResponseShape::Text,
            1 => ResponseShape::Chart,
            _ => ResponseShape::Table,
        }
    }

    /// Fixed long-form insight copy
    fn text_response() -> Message {
        Message::assistant(
            "Here's what I found: overall revenue grew 14% quarter over quarter, \
             driven primarily by the Gadgets category in the APAC region. \
             Express shipping orders convert at nearly twice the rate of standard \
             shipping, and returned orders are concentrated in the Premium category.\n\n\
             Recommendation: expand the APAC Gadgets assortment ahead of the next \
             quarter and review Premium packaging, which correlates with the \
             elevated return rate.",
        )
    }

    /// Fixed multi-point monthly revenue time series with a line encoding
    fn chart_response() -> Message {
        let spec = json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "description": "Monthly revenue trend",
            "mark": "line",
            "encoding": {
                "x": {"field": "month", "type": "ordinal"},
                "y": {"field": "revenue", "type": "quantitative"}
            },
            "data": {"values": [
                {"month": "Jan", "revenue": 1240},
                {"month": "Feb", "revenue": 1380},
                {"month": "Mar", "revenue": 1105},
                {"month": "Apr", "revenue": 1520},
                {"month": "May", "revenue": 1689},
                {"month": "Jun", "revenue": 1475},
                {"month": "Jul", "revenue": 1830},
                {"month": "Aug", "revenue": 1962}
            ]}
        });
        Message::assistant_chart(spec)
    }

    /// Fixed 5-row product performance table
    fn table_response() -> Message {
        let table = TablePayload::new(
            vec![
                "Product".to_string(),
                "Category".to_string(),
                "Units Sold".to_string(),
                "Revenue".to_string(),
                "Growth".to_string(),
            ],
            vec![
                vec![
                    "Widget A".to_string(),
                    "Gadgets".to_string(),
                    "1,240".to_string(),
                    "$15,500".to_string(),
                    "+12%".to_string(),
                ],
                vec![
                    "Gizmo X".to_string(),
                    "Widgets".to_string(),
                    "860".to_string(),
                    "$21,930".to_string(),
                    "+8%".to_string(),
                ],
                vec![
                    "Deluxe".to_string(),
                    "Premium".to_string(),
                    "310".to_string(),
                    "$30,690".to_string(),
                    "-3%".to_string(),
                ],
                vec![
                    "Thing 2".to_string(),
                    "Accessories".to_string(),
                    "2,150".to_string(),
                    "$15,050".to_string(),
                    "+21%".to_string(),
                ],
                vec![
                    "Basic".to_string(),
                    "Premium".to_string(),
                    "540".to_string(),
                    "$26,730".to_string(),
                    "+5%".to_string(),
                ],
            ],
        );
        Message::assistant_table(table)
    }
}

#[async_trait]
impl ResponseProvider for CannedInsightProvider {
    async fn send_query(&self, text: &str, datasource_id: &str) -> Result<Message> {
        tracing::debug!(datasource = datasource_id, "Simulating query: {}", text);
        tokio::time::sleep(self.delay).await;

        let message = match self.pick_shape() {
            ResponseShape::Text => Self::text_response(),
            ResponseShape::Chart => Self::chart_response(),
            ResponseShape::Table => Self::table_response(),
        };
        Ok(message)
    }

    fn name(&self) -> &str {
        "canned"
    }
}
