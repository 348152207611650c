use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::chart::{AggregationMode, Granularity, MonthlyActivity, PeriodSum};
use crate::models::monthly::MonthlyInvestment;
use crate::models::transaction::{Transaction, TransactionType};

/// Anything dated that moves money in or out.
pub trait Flow {
    fn date(&self) -> NaiveDate;

    /// Money moved (always positive)
    fn amount(&self) -> f64;

    fn direction(&self) -> TransactionType;

    /// Amount signed by direction: buys positive, sells negative.
    fn signed_amount(&self) -> f64 {
        match self.direction() {
            TransactionType::Buy => self.amount(),
            TransactionType::Sell => -self.amount(),
        }
    }
}

impl Flow for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn direction(&self) -> TransactionType {
        self.transaction_type
    }
}

/// Ad-hoc investments are always money going in.
impl Flow for MonthlyInvestment {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn direction(&self) -> TransactionType {
        TransactionType::Buy
    }
}

/// Sortable period key; `sub` is the month (1-12), quarter (1-4) or 0 for years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PeriodKey {
    year: i32,
    sub: u32,
}

impl PeriodKey {
    fn of(date: NaiveDate, granularity: Granularity) -> Self {
        let sub = match granularity {
            Granularity::Month => date.month(),
            Granularity::Quarter => (date.month() - 1) / 3 + 1,
            Granularity::Year => 0,
        };
        Self {
            year: date.year(),
            sub,
        }
    }

    fn label(&self, granularity: Granularity) -> String {
        match granularity {
            Granularity::Month => format!("{:04}-{:02}", self.year, self.sub),
            Granularity::Quarter => format!("{:04}-Q{}", self.year, self.sub),
            Granularity::Year => format!("{:04}", self.year),
        }
    }

    fn next(&self, granularity: Granularity) -> Self {
        let last = match granularity {
            Granularity::Month => 12,
            Granularity::Quarter => 4,
            Granularity::Year => return Self { year: self.year + 1, sub: 0 },
        };
        if self.sub >= last {
            Self { year: self.year + 1, sub: 1 }
        } else {
            Self { year: self.year, sub: self.sub + 1 }
        }
    }

    fn parse(label: &str, granularity: Granularity) -> Option<Self> {
        match granularity {
            Granularity::Month => {
                let (y, m) = label.split_once('-')?;
                Some(Self { year: y.parse().ok()?, sub: m.parse().ok()? })
            }
            Granularity::Quarter => {
                let (y, q) = label.split_once("-Q")?;
                Some(Self { year: y.parse().ok()?, sub: q.parse().ok()? })
            }
            Granularity::Year => Some(Self { year: label.parse().ok()?, sub: 0 }),
        }
    }
}

/// Groups and sums dated flows into chart series and summary tables.
///
/// Pure business logic, no I/O.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum flows per calendar period, oldest period first.
    ///
    /// Only periods that contain at least one flow are returned; use
    /// `fill_gaps` for a dense series. In `ByType` mode a period yields a Buy
    /// bucket and/or a Sell bucket (Buy first), each the plain sum of amounts.
    pub fn group_sum_by_period<F: Flow>(
        &self,
        flows: &[F],
        granularity: Granularity,
        mode: AggregationMode,
    ) -> Vec<PeriodSum> {
        match mode {
            AggregationMode::Net => {
                let mut buckets: BTreeMap<PeriodKey, f64> = BTreeMap::new();
                for flow in flows {
                    *buckets
                        .entry(PeriodKey::of(flow.date(), granularity))
                        .or_insert(0.0) += flow.signed_amount();
                }
                buckets
                    .into_iter()
                    .map(|(key, sum)| PeriodSum {
                        period: key.label(granularity),
                        transaction_type: None,
                        sum,
                    })
                    .collect()
            }
            AggregationMode::ByType => {
                let mut buckets: BTreeMap<(PeriodKey, TransactionType), f64> = BTreeMap::new();
                for flow in flows {
                    *buckets
                        .entry((PeriodKey::of(flow.date(), granularity), flow.direction()))
                        .or_insert(0.0) += flow.amount();
                }
                buckets
                    .into_iter()
                    .map(|((key, direction), sum)| PeriodSum {
                        period: key.label(granularity),
                        transaction_type: Some(direction),
                        sum,
                    })
                    .collect()
            }
        }
    }

    /// Pad a net-mode series with zero buckets for every missing period
    /// between its first and last entry.
    ///
    /// Entries whose label does not parse at `granularity` are kept in place.
    pub fn fill_gaps(&self, series: &[PeriodSum], granularity: Granularity) -> Vec<PeriodSum> {
        let mut filled = Vec::with_capacity(series.len());
        let mut expected: Option<PeriodKey> = None;

        for entry in series {
            if let Some(key) = PeriodKey::parse(&entry.period, granularity) {
                if let Some(mut next) = expected {
                    while next < key {
                        filled.push(PeriodSum {
                            period: next.label(granularity),
                            transaction_type: None,
                            sum: 0.0,
                        });
                        next = next.next(granularity);
                    }
                }
                expected = Some(key.next(granularity));
            }
            filled.push(entry.clone());
        }
        filled
    }

    /// Sum amounts per key (by type, by fund, by category...).
    pub fn group_sum_by_key<T, K, F>(&self, items: &[T], key_fn: F) -> BTreeMap<K, f64>
    where
        T: Flow,
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut sums = BTreeMap::new();
        for item in items {
            *sums.entry(key_fn(item)).or_insert(0.0) += item.amount();
        }
        sums
    }

    /// Σ buys − Σ sells.
    pub fn net_amount<F: Flow>(&self, flows: &[F]) -> f64 {
        flows.iter().map(Flow::signed_amount).sum()
    }

    /// Buy, sell and net totals per month, for the investment activity chart.
    pub fn monthly_activity<F: Flow>(&self, flows: &[F]) -> Vec<MonthlyActivity> {
        let mut months: BTreeMap<PeriodKey, (f64, f64)> = BTreeMap::new();
        for flow in flows {
            let entry = months
                .entry(PeriodKey::of(flow.date(), Granularity::Month))
                .or_insert((0.0, 0.0));
            match flow.direction() {
                TransactionType::Buy => entry.0 += flow.amount(),
                TransactionType::Sell => entry.1 += flow.amount(),
            }
        }
        months
            .into_iter()
            .map(|(key, (buy, sell))| MonthlyActivity {
                period: key.label(Granularity::Month),
                buy,
                sell,
                net: buy - sell,
            })
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
