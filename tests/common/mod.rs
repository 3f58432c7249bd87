//! Shared fakes for integration tests.

#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, TxHash, U256};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use zora_coins::blockchain::{
    BlockchainError, BlockchainResult, CoinDeployment, CoinFactory, CoinParams, CreationCall,
};
use zora_coins::metadata::{MetadataUploader, UploadFile};
use zora_coins::service::{ServiceError, ServiceErrorKind, ServiceResult};

pub const ONE_ETH: u64 = 1_000_000_000_000_000_000;

/// In-process coin factory with scripted results and call counters.
pub struct FakeFactory {
    pub creator: Address,
    pub balance: U256,
    pub predicted: Address,
    pub submit_error: Option<ServiceErrorKind>,
    pub unconfirmed: bool,
    pub reveal_address: bool,
    pub balance_calls: AtomicU32,
    pub prepare_calls: AtomicU32,
    pub submit_calls: AtomicU32,
    pub last_params: Mutex<Option<CoinParams>>,
}

impl FakeFactory {
    pub fn funded() -> Self {
        Self {
            creator: Address::repeat_byte(0xc0),
            balance: U256::from(ONE_ETH),
            predicted: Address::repeat_byte(0x99),
            submit_error: None,
            unconfirmed: false,
            reveal_address: true,
            balance_calls: AtomicU32::new(0),
            prepare_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn failing_submit(mut self, kind: ServiceErrorKind) -> Self {
        self.submit_error = Some(kind);
        self
    }

    /// Broadcast succeeds but the receipt never arrives.
    pub fn losing_receipt(mut self) -> Self {
        self.unconfirmed = true;
        self
    }

    pub fn total_calls(&self) -> u32 {
        self.balance_calls.load(Ordering::SeqCst)
            + self.prepare_calls.load(Ordering::SeqCst)
            + self.submit_calls.load(Ordering::SeqCst)
    }
}

impl CoinFactory for FakeFactory {
    fn creator(&self) -> Address {
        self.creator
    }

    async fn balance(&self) -> BlockchainResult<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance)
    }

    async fn prepare(&self, params: &CoinParams) -> BlockchainResult<CreationCall> {
        self.prepare_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());
        Ok(CreationCall {
            to: Address::repeat_byte(0x77),
            data: Bytes::from(vec![0x01, 0x02]),
            value: U256::ZERO,
            predicted_address: self.predicted,
        })
    }

    async fn submit(&self, call: &CreationCall) -> BlockchainResult<CoinDeployment> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = self.submit_error {
            return Err(BlockchainError::Rpc {
                kind,
                message: format!("scripted {:?} failure", kind),
            });
        }
        if self.unconfirmed {
            return Err(BlockchainError::Unconfirmed {
                tx_hash: TxHash::repeat_byte(0xee),
                reason: "no receipt after 180 seconds".to_string(),
            });
        }
        Ok(CoinDeployment {
            tx_hash: TxHash::repeat_byte(0xee),
            address: self.reveal_address.then_some(call.predicted_address),
        })
    }
}

/// In-process storage backend that hands out sequential CIDs.
#[derive(Default)]
pub struct FakeUploader {
    pub files: Mutex<Vec<UploadFile>>,
    pub fail_with: Option<ServiceErrorKind>,
}

impl FakeUploader {
    pub fn failing(kind: ServiceErrorKind) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            fail_with: Some(kind),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl MetadataUploader for FakeUploader {
    async fn upload(&self, file: UploadFile) -> ServiceResult<String> {
        if let Some(kind) = self.fail_with {
            return Err(ServiceError::new(kind, "metadata upload", "scripted failure"));
        }
        let mut files = self.files.lock().unwrap();
        files.push(file);
        Ok(format!("ipfs://bafyfake{}", files.len()))
    }
}

/// Write a small image into `dir` and return its path.
pub fn write_image(dir: &std::path::Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]).unwrap();
    path
}
