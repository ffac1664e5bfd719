//! Time-bank replay: the running surplus/deficit balance, reconstructed by
//! summing `bank_delta_minutes` strictly in date order. Balance at date D
//! equals balance at D−1 plus delta(D); the callers guarantee a gap-free
//! date sequence.

use crate::models::summary::DailyTimeSummary;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct BankEntry {
    pub date: NaiveDate,
    pub delta: i64,
    pub balance: i64,
}

pub fn replay(summaries: &[DailyTimeSummary]) -> Vec<BankEntry> {
    let mut balance = 0;
    let mut out = Vec::with_capacity(summaries.len());

    for s in summaries {
        balance += s.bank_delta_minutes;
        out.push(BankEntry {
            date: s.date,
            delta: s.bank_delta_minutes,
            balance,
        });
    }

    out
}

pub fn closing_balance(summaries: &[DailyTimeSummary]) -> i64 {
    summaries.iter().map(|s| s.bank_delta_minutes).sum()
}
