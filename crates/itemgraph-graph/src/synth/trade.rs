use super::{EdgeSynthesizer, Synthesized};
use crate::edge::{Edge, ForwardEdge, Tag};
use crate::relation::RelationKind;
use itemgraph_core::{non_blank, Amount, ShopEntry, TraderRecord};

/// Emits a `trader` edge from the trader to each listed item.
pub struct TradeSynthesizer;

impl EdgeSynthesizer<TraderRecord> for TradeSynthesizer {
    fn label(&self) -> &'static str {
        "trade"
    }

    fn synthesize(&self, record: &TraderRecord, _name: &str) -> Synthesized {
        let mut out = Synthesized::default();

        for entry in &record.shop {
            let Some(item) = entry.item_name() else {
                out.dropped += 1;
                continue;
            };
            let edge = Edge::new(RelationKind::Trader)
                .with_quantity(Some(Amount::Count(1)))
                .with_dependency(listing_tags(entry));
            out.edges.push(ForwardEdge::new(item, edge));
        }

        out
    }
}

fn listing_tags(entry: &ShopEntry) -> Vec<Tag> {
    let mut tags = Vec::new();
    if let Some(price) = &entry.price {
        tags.push(Tag::Price {
            amount: price.clone(),
            currency: non_blank(&entry.currency).map(str::to_string),
        });
    }
    if let Some(stock) = &entry.stock {
        tags.push(Tag::Stock {
            value: stock.clone(),
            is_limited: entry.is_limited,
        });
    }
    if let Some(count) = &entry.ammo_count {
        tags.push(Tag::AmmoCount {
            value: count.clone(),
        });
    }
    tags
}
