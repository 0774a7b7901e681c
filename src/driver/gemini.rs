// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Google Gemini tool-calling driver.
//!
//! The model sees the user's profile in the system prompt, the bounded recent
//! history, and one function declaration per ledger operation. Selected calls
//! run through the engine and their outcomes are fed back until the model
//! produces a plain-text reply. Remote failures propagate to the transport
//! boundary; the ledger is never touched on a failed exchange.

use crate::driver::{ConversationDriver, Turn};
use crate::engine::{self, OperationRequest};
use crate::models::{Asset, LedgerRecord};
use crate::ops::LedgerError;
use crate::store::LedgerStore;
use crate::utils;
use anyhow::{Context as _, Result, anyhow, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const MAX_TOOL_ROUNDS: usize = 4;

pub struct GeminiDriver {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl GeminiDriver {
    pub fn new(api_key: String, model: Option<&str>) -> Result<Self> {
        let model = model.unwrap_or(DEFAULT_MODEL);
        Ok(GeminiDriver {
            client: utils::http_client()?,
            api_key,
            url: format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
            ),
        })
    }

    /// `GEMINI_API_KEY` selects this driver; `GEMINI_MODEL` overrides the
    /// default model. No key means no driver, not an error.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                let model = std::env::var("GEMINI_MODEL").ok();
                Ok(Some(GeminiDriver::new(key, model.as_deref())?))
            }
            _ => Ok(None),
        }
    }
}

fn system_prompt(record: &LedgerRecord) -> String {
    let name = if record.full_name.is_empty() {
        "User"
    } else {
        &record.full_name
    };
    let job = if record.job.is_empty() {
        "Gig worker"
    } else {
        &record.job
    };
    let goals = if record.financial_goals.is_empty() {
        "Financial stability"
    } else {
        &record.financial_goals
    };
    let debt = if record.current_debt.is_empty() {
        "None"
    } else {
        &record.current_debt
    };
    format!(
        "You are Muneem, an autonomous wealth manager for {name}.\n\
         \n\
         USER PROFILE:\n\
         - Occupation: {job}\n\
         - Financial goals: {goals}\n\
         - Current debt/EMI: {debt}\n\
         \n\
         RULES:\n\
         1. Remember their occupation, debt and goals when replying.\n\
         2. 'I made 5000' means income: call deposit_income. 'Bike costs 5000' \
         is a price: call check_balance to see if they can afford it.\n\
         3. Never move money without approval: use propose_investment and let \
         the user confirm with YES.\n\
         4. If they carry debt, suggest paying that down before investing; \
         otherwise invest towards their goal.\n\
         \n\
         Tone: professional but friendly financial advisor. Keep replies short; \
         this is a WhatsApp chat."
    )
}

fn tool_declarations() -> Value {
    json!([
        {
            "name": "check_balance",
            "description": "Returns the current wallet balances and net worth.",
            "parameters": { "type": "OBJECT", "properties": {} }
        },
        {
            "name": "get_market_sentiment",
            "description": "Returns current market trends to decide where to invest.",
            "parameters": { "type": "OBJECT", "properties": {} }
        },
        {
            "name": "deposit_income",
            "description": "Record money the user EARNED or RECEIVED. Never call for prices or costs.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "amount": { "type": "INTEGER", "description": "Whole rupees, positive" },
                    "source": { "type": "STRING", "description": "Where the money came from" }
                },
                "required": ["amount"]
            }
        },
        {
            "name": "record_expense",
            "description": "Record money the user spent from liquid cash.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "amount": { "type": "INTEGER" },
                    "description": { "type": "STRING" }
                },
                "required": ["amount", "description"]
            }
        },
        {
            "name": "propose_investment",
            "description": "Propose moving cash into gold or mutual funds. Requires user confirmation before money moves.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "amount": { "type": "INTEGER" },
                    "asset_class": { "type": "STRING", "description": "'gold' or 'mutual_funds'" }
                },
                "required": ["amount", "asset_class"]
            }
        },
        {
            "name": "invest_money",
            "description": "Move cash into gold or mutual funds immediately. Only when the user has already approved in this message.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "amount": { "type": "INTEGER" },
                    "asset_class": { "type": "STRING", "description": "'gold' or 'mutual_funds'" }
                },
                "required": ["amount", "asset_class"]
            }
        },
        {
            "name": "confirm_transaction",
            "description": "Execute the pending proposed investment. Call when the user replies YES.",
            "parameters": { "type": "OBJECT", "properties": {} }
        },
        {
            "name": "cancel_transaction",
            "description": "Discard the pending proposed investment. Call when the user replies NO.",
            "parameters": { "type": "OBJECT", "properties": {} }
        },
        {
            "name": "transfer_asset",
            "description": "Move money between cash, gold and mutual funds.",
            "parameters": {
                "type": "OBJECT",
                "properties": {
                    "amount": { "type": "INTEGER" },
                    "from_asset": { "type": "STRING" },
                    "to_asset": { "type": "STRING" }
                },
                "required": ["amount", "from_asset", "to_asset"]
            }
        }
    ])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn text_part(role: &str, text: &str) -> Content {
    Content {
        role: Some(role.to_string()),
        parts: vec![Part {
            text: Some(text.to_string()),
            ..Default::default()
        }],
    }
}

fn arg_i64(args: &Value, key: &str) -> Option<i64> {
    args.get(key).and_then(Value::as_i64)
}

fn arg_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

/// Run one selected tool against the ledger. Argument problems become tool
/// outcome text (the model can recover); only storage faults are errors.
fn run_tool(store: &dyn LedgerStore, call: &FunctionCall) -> Result<String> {
    let args = &call.args;
    let amount = || arg_i64(args, "amount");
    let asset = |key: &str| -> Result<Asset, LedgerError> {
        let label = arg_str(args, key).unwrap_or_default();
        Asset::resolve(&label).ok_or(LedgerError::UnrecognizedAsset(label))
    };

    let req = match call.name.as_str() {
        "check_balance" => OperationRequest::CheckBalance,
        "get_market_sentiment" => OperationRequest::MarketSentiment,
        "deposit_income" => {
            let Some(amount) = amount() else {
                return Ok("Missing required integer argument 'amount'".to_string());
            };
            let source = arg_str(args, "source").unwrap_or_else(|| "Gig work".to_string());
            OperationRequest::DepositIncome { amount, source }
        }
        "record_expense" => {
            let Some(amount) = amount() else {
                return Ok("Missing required integer argument 'amount'".to_string());
            };
            let description =
                arg_str(args, "description").unwrap_or_else(|| "an expense".to_string());
            OperationRequest::RecordExpense {
                amount,
                description,
            }
        }
        "propose_investment" => {
            let Some(amount) = amount() else {
                return Ok("Missing required integer argument 'amount'".to_string());
            };
            match asset("asset_class") {
                Ok(asset) => OperationRequest::ProposeInvestment { amount, asset },
                Err(e) => return Ok(e.to_string()),
            }
        }
        "invest_money" => {
            let Some(amount) = amount() else {
                return Ok("Missing required integer argument 'amount'".to_string());
            };
            match asset("asset_class") {
                Ok(asset) => OperationRequest::InvestDirect { amount, asset },
                Err(e) => return Ok(e.to_string()),
            }
        }
        "confirm_transaction" => OperationRequest::ConfirmTransaction,
        "cancel_transaction" => OperationRequest::CancelTransaction,
        "transfer_asset" => {
            let Some(amount) = amount() else {
                return Ok("Missing required integer argument 'amount'".to_string());
            };
            match (asset("from_asset"), asset("to_asset")) {
                (Ok(from), Ok(to)) => OperationRequest::TransferAsset { amount, from, to },
                (Err(e), _) | (_, Err(e)) => return Ok(e.to_string()),
            }
        }
        unknown => return Ok(format!("Unknown tool '{unknown}'")),
    };
    engine::execute(store, &req)
}

#[async_trait]
impl ConversationDriver for GeminiDriver {
    async fn reply(
        &self,
        store: &dyn LedgerStore,
        history: &[Turn],
        input: &str,
    ) -> Result<String> {
        let record = store.load()?;
        let mut contents = Vec::with_capacity(history.len() * 2 + 1);
        for turn in history {
            contents.push(text_part("user", &turn.user));
            contents.push(text_part("model", &turn.bot));
        }
        contents.push(text_part("user", input));

        for _ in 0..MAX_TOOL_ROUNDS {
            let body = GenerateRequest {
                system_instruction: Content {
                    role: None,
                    parts: vec![Part {
                        text: Some(system_prompt(&record)),
                        ..Default::default()
                    }],
                },
                contents: contents.clone(),
                tools: vec![json!({ "functionDeclarations": tool_declarations() })],
            };
            let resp = self
                .client
                .post(&self.url)
                .query(&[("key", self.api_key.as_str())])
                .json(&body)
                .send()
                .await
                .context("Call Gemini")?;
            let status = resp.status();
            if !status.is_success() {
                let detail = resp.text().await.unwrap_or_default();
                bail!("Gemini returned {status}: {detail}");
            }
            let parsed: GenerateResponse =
                resp.json().await.context("Decode Gemini response")?;
            let content = parsed
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .ok_or_else(|| anyhow!("Gemini returned no candidates"))?;

            let calls: Vec<FunctionCall> = content
                .parts
                .iter()
                .filter_map(|p| p.function_call.clone())
                .collect();
            if calls.is_empty() {
                let text: String = content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("");
                if text.trim().is_empty() {
                    bail!("Gemini reply contained no text");
                }
                return Ok(text);
            }

            contents.push(Content {
                role: Some("model".to_string()),
                parts: content.parts.clone(),
            });
            let mut responses = Vec::with_capacity(calls.len());
            for call in calls {
                let outcome = run_tool(store, &call)?;
                tracing::debug!(tool = %call.name, outcome = %outcome, "tool executed");
                responses.push(Part {
                    function_response: Some(FunctionResponse {
                        name: call.name,
                        response: json!({ "result": outcome }),
                    }),
                    ..Default::default()
                });
            }
            contents.push(Content {
                role: Some("function".to_string()),
                parts: responses,
            });
        }
        bail!("Gemini tool loop exceeded {MAX_TOOL_ROUNDS} rounds")
    }
}
