//! Presentation helpers for balances ("+$42.00", "You owe $30.00").

use serde::Serialize;

use homeshare_core::{MemberId, Money};

use crate::balance::BalanceSheet;
use crate::expense::Expense;

/// Which side of the ledger a member is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStanding {
    /// Net creditor: others owe this member.
    Owed,
    /// Net debtor.
    Owes,
    Settled,
}

impl BalanceStanding {
    pub fn from_net(net: Money) -> Self {
        if net.is_positive() {
            Self::Owed
        } else if net.is_negative() {
            Self::Owes
        } else {
            Self::Settled
        }
    }
}

/// `+$42.00` for non-negative amounts, `-$30.00` otherwise.
pub fn format_signed(amount: Money, symbol: &str) -> String {
    let sign = if amount.is_negative() { '-' } else { '+' };
    format!("{sign}{symbol}{}", amount.abs())
}

/// `$42.00`, ignoring the sign.
pub fn format_unsigned(amount: Money, symbol: &str) -> String {
    format!("{symbol}{}", amount.abs())
}

/// Sum of every expense amount (the "Total" line of the expenses screen).
///
/// Display only, so it saturates at the largest amount instead of failing.
pub fn household_total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Money {
    expenses
        .into_iter()
        .fold(Money::ZERO, |total, e| total.saturating_add(e.amount))
}

/// One counterparty line of a member's breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counterparty {
    pub member_id: MemberId,
    pub amount: Money,
}

/// What a single member sees about their own balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalanceSummary {
    pub member_id: MemberId,
    pub net_balance: Money,
    pub standing: BalanceStanding,
    /// e.g. `+$42.00`
    pub display: String,
    /// e.g. `You are owed $42.00`
    pub label: String,
    pub owes: Vec<Counterparty>,
    pub owed: Vec<Counterparty>,
    pub household_total: Money,
}

impl MemberBalanceSummary {
    /// Summarise `member`'s row of `sheet`; `None` if the member is not on the sheet.
    pub fn from_sheet<'a>(
        sheet: &BalanceSheet,
        member: &MemberId,
        expenses: impl IntoIterator<Item = &'a Expense>,
        symbol: &str,
    ) -> Option<Self> {
        let balance = sheet.get(member)?;
        let net = balance.net_balance;
        let standing = BalanceStanding::from_net(net);

        let label = match standing {
            BalanceStanding::Owed => format!("You are owed {}", format_unsigned(net, symbol)),
            BalanceStanding::Owes => format!("You owe {}", format_unsigned(net, symbol)),
            BalanceStanding::Settled => "All settled up".to_string(),
        };

        let lines = |map: &std::collections::BTreeMap<MemberId, Money>| {
            map.iter()
                .map(|(member_id, amount)| Counterparty {
                    member_id: member_id.clone(),
                    amount: *amount,
                })
                .collect::<Vec<_>>()
        };

        Some(Self {
            member_id: member.clone(),
            net_balance: net,
            standing,
            display: format_signed(net, symbol),
            label,
            owes: lines(&balance.owes),
            owed: lines(&balance.owed),
            household_total: household_total(expenses),
        })
    }
}
