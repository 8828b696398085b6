use std::io::Write;

use engine::{Render, ResultEngine, View};

/// Plain-text renderer: one line per record, then the three totals.
pub struct TextRenderer<W> {
    out: W,
    list: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, list: true }
    }

    /// Renders only the totals block.
    pub fn summary(out: W) -> Self {
        Self { out, list: false }
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render(&mut self, view: &View<'_>) -> ResultEngine<()> {
        if self.list {
            if view.is_empty() {
                writeln!(self.out, "No transactions found")?;
            }
            for tx in &view.transactions {
                writeln!(
                    self.out,
                    "#{}  [{}]  {}  {}",
                    tx.id,
                    tx.kind.as_str(),
                    tx.description,
                    tx.amount.format(view.currency)
                )?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "Income:  {}", view.totals.income.format(view.currency))?;
        writeln!(self.out, "Expense: {}", view.totals.expense.format(view.currency))?;
        writeln!(self.out, "Balance: {}", view.totals.balance.format(view.currency))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use engine::{Currency, Filter, Money, Totals, Transaction, TransactionKind};

    use super::*;

    fn render(renderer: &mut TextRenderer<Vec<u8>>, view: &View<'_>) -> String {
        renderer.render(view).unwrap();
        String::from_utf8(std::mem::take(&mut renderer.out)).unwrap()
    }

    #[test]
    fn empty_view_says_so() {
        let view = View {
            filter: Filter::All,
            transactions: Vec::new(),
            totals: Totals::default(),
            currency: Currency::Usd,
        };
        let text = render(&mut TextRenderer::new(Vec::new()), &view);
        assert_eq!(
            text,
            "No transactions found\n\nIncome:  $0.00\nExpense: $0.00\nBalance: $0.00\n"
        );
    }

    #[test]
    fn lists_records_and_totals() {
        let records = [
            Transaction {
                id: 1,
                description: "Salary".to_string(),
                amount: Money::new(1_200_00),
                kind: TransactionKind::Income,
            },
            Transaction {
                id: 2,
                description: "Rent".to_string(),
                amount: Money::new(1_500_00),
                kind: TransactionKind::Expense,
            },
        ];
        let view = View {
            filter: Filter::All,
            transactions: records.iter().collect(),
            totals: Totals::from_records(&records).unwrap(),
            currency: Currency::Usd,
        };
        let text = render(&mut TextRenderer::new(Vec::new()), &view);
        assert_eq!(
            text,
            "#1  [income]  Salary  $1,200.00\n\
             #2  [expense]  Rent  $1,500.00\n\
             \n\
             Income:  $1,200.00\n\
             Expense: $1,500.00\n\
             Balance: -$300.00\n"
        );
    }

    #[test]
    fn summary_skips_the_list() {
        let view = View {
            filter: Filter::Income,
            transactions: Vec::new(),
            totals: Totals::default(),
            currency: Currency::Eur,
        };
        let text = render(&mut TextRenderer::summary(Vec::new()), &view);
        assert_eq!(text, "Income:  €0.00\nExpense: €0.00\nBalance: €0.00\n");
    }
}
