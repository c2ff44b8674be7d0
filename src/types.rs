// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};

/// Standard explorer response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanResponse<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: T,
}

/// Explorers that send `null` for an unset field get the same empty text as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One row of `account/txlist`. Every field is kept as the text the API returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(rename = "blockHash", deserialize_with = "null_as_empty")]
    pub block_hash: String,
    #[serde(rename = "blockNumber", deserialize_with = "null_as_empty")]
    pub block_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub confirmations: String,
    #[serde(rename = "contractAddress", deserialize_with = "null_as_empty")]
    pub contract_address: String,
    #[serde(rename = "cumulativeGasUsed", deserialize_with = "null_as_empty")]
    pub cumulative_gas_used: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub from: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub gas: String,
    #[serde(rename = "gasPrice", deserialize_with = "null_as_empty")]
    pub gas_price: String,
    #[serde(rename = "gasUsed", deserialize_with = "null_as_empty")]
    pub gas_used: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub input: String,
    #[serde(rename = "isError", deserialize_with = "null_as_empty")]
    pub is_error: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub nonce: String,
    #[serde(rename = "timeStamp", deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub to: String,
    #[serde(rename = "transactionIndex", deserialize_with = "null_as_empty")]
    pub transaction_index: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub txreceipt_status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_from_api_names() {
        let value = json!({
            "blockNumber": "17700000",
            "timeStamp": "1690000000",
            "hash": "0xabc",
            "nonce": "7",
            "blockHash": "0xdef",
            "transactionIndex": "12",
            "from": "0x01",
            "to": "0x02",
            "value": "1000000000000000000",
            "gas": "21000",
            "gasPrice": "30000000000",
            "isError": "0",
            "txreceipt_status": "1",
            "input": "0x",
            "contractAddress": "",
            "cumulativeGasUsed": "500000",
            "gasUsed": "21000",
            "confirmations": "42",
            "methodId": "0x",
            "functionName": ""
        });

        let txn: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(txn.block_number, "17700000");
        assert_eq!(txn.timestamp, "1690000000");
        assert_eq!(txn.txreceipt_status, "1");
        assert_eq!(txn.cumulative_gas_used, "500000");
        assert_eq!(txn.confirmations, "42");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let txn: Transaction = serde_json::from_value(json!({ "hash": "0x1" })).unwrap();
        assert_eq!(txn.hash, "0x1");
        assert!(txn.from.is_empty());
        assert!(txn.timestamp.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let txn: Transaction =
            serde_json::from_str(r#"{"hash":"0x1","contractAddress":null,"to":null}"#).unwrap();
        assert_eq!(txn.hash, "0x1");
        assert!(txn.contract_address.is_empty());
        assert!(txn.to.is_empty());
    }

    #[test]
    fn test_envelope_with_error_result() {
        let resp: EtherscanResponse<serde_json::Value> = serde_json::from_value(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Invalid API Key"
        }))
        .unwrap();
        assert_eq!(resp.status, "0");
        assert_eq!(resp.result.as_str(), Some("Invalid API Key"));
    }
}
