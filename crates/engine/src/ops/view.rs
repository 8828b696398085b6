use crate::{Filter, Render, ResultEngine, View};

use super::Engine;

impl Engine {
    /// Build the view for `filter`: matching records plus totals over all
    /// records.
    pub fn view(&self, filter: Filter) -> ResultEngine<View<'_>> {
        Ok(View {
            filter,
            transactions: self.ledger.list(filter),
            totals: self.ledger.totals()?,
            currency: self.currency,
        })
    }

    pub fn render<R>(&self, filter: Filter, renderer: &mut R) -> ResultEngine<()>
    where
        R: Render + ?Sized,
    {
        renderer.render(&self.view(filter)?)
    }
}
