use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: u64,
    pub timestamp: i64,
    pub transaction_count: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDetail {
    pub number: u64,
    pub timestamp: i64,
    pub transaction_count: u32,
    pub created_at: String,
    #[serde(default)]
    pub parent_hash: Option<String>,
    #[serde(default)]
    pub gas_used: Option<u64>,
    #[serde(default)]
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub miner: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub total_difficulty: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub extra_data: Option<String>,
    #[serde(default)]
    pub logs_bloom: Option<String>,
    #[serde(default)]
    pub mix_hash: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub nonce: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub base_fee_per_gas: Option<String>,
    #[serde(default)]
    pub block_processed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub block_number: u64,
    pub position: u32,
    pub created_at: String,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub value: Option<String>,
    #[serde(default)]
    pub status: Option<u8>,
}

impl Transaction {
    pub fn succeeded(&self) -> Option<bool> {
        self.status.map(|s| s == STATUS_SUCCESS)
    }
}

pub const STATUS_SUCCESS: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub hash: String,
    pub block_number: u64,
    pub position: u32,
    pub created_at: String,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub value: Option<String>,
    #[serde(default)]
    pub gas_used: Option<u64>,
    #[serde(default, deserialize_with = "decimal")]
    pub gas_price: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub max_fee_per_gas: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub max_priority_fee_per_gas: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub effective_gas_price: Option<String>,
    #[serde(default)]
    pub cumulative_gas_used: Option<u64>,
    #[serde(default, deserialize_with = "decimal")]
    pub transaction_fee: Option<String>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub input_data: Option<String>,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub logs_count: Option<u32>,
    #[serde(default)]
    pub method_id: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<u8>,
    #[serde(default)]
    pub is_bridge_transaction: Option<bool>,
    #[serde(default)]
    pub bridge_direction: Option<String>,
    #[serde(default)]
    pub tx_processed_at: Option<String>,
}

impl TransactionDetail {
    pub fn succeeded(&self) -> Option<bool> {
        self.status.map(|s| s == STATUS_SUCCESS)
    }

    pub fn type_label(&self) -> &'static str {
        match self.transaction_type {
            Some(0) => "Legacy (Type 0)",
            Some(1) => "Access List (Type 1)",
            Some(2) => "EIP-1559 (Type 2)",
            Some(3) => "Blob (Type 3)",
            Some(_) => "Unknown",
            None => "N/A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    #[serde(default)]
    pub transaction_count: Option<u64>,
    #[serde(default, deserialize_with = "decimal")]
    pub balance: Option<String>,
    #[serde(default)]
    pub is_contract: Option<bool>,
    #[serde(default)]
    pub last_seen_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDetail {
    pub address: String,
    pub first_seen_block: u64,
    pub last_seen_block: u64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub transaction_count_out: Option<u64>,
    #[serde(default)]
    pub transaction_count_in: Option<u64>,
    #[serde(default, deserialize_with = "decimal")]
    pub total_sent: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub total_received: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub balance: Option<String>,
    #[serde(default)]
    pub is_contract: Option<bool>,
}

impl AddressDetail {
    pub fn transaction_count(&self) -> u64 {
        self.transaction_count_in.unwrap_or(0) + self.transaction_count_out.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub current_block_height: u64,
    pub total_transactions: u64,
    pub total_addresses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGrowthPoint {
    pub timestamp: String,
    pub total_addresses: u64,
    pub block_number: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGrowth {
    #[serde(default)]
    pub data_points: Vec<UserGrowthPoint>,
}

/// Pagination envelope returned by every list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Big integers arrive as JSON strings from most indexers, but some emit
/// plain numbers. Both are kept as decimal strings.
fn decimal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        // Exponent or fractional renderings are not amounts.
        Some(Value::Number(n)) => Some(n.to_string()).filter(|s| s.bytes().all(|b| b.is_ascii_digit())),
        _ => None,
    })
}
