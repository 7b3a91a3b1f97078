use crate::cards::{
    BuildingCard, Card, CardIdentity, Catalog, Category, CostOptions, DeckFactory, QuantityTable,
    ResourceCard,
};

const fn basic(n: u32) -> CardIdentity {
    CardIdentity::basic(n)
}

const fn l1(n: u32) -> CardIdentity {
    CardIdentity::level_one(n)
}

const fn l2(n: u32) -> CardIdentity {
    CardIdentity::level_two(n)
}

fn cost<const N: usize, const M: usize>(options: [[CardIdentity; M]; N]) -> CostOptions {
    CostOptions::any_of(options)
}

fn basic_resources() -> Vec<Card> {
    ["Timber", "Ore", "Grain", "Clay"]
        .into_iter()
        .zip(1..)
        .map(|(name, n)| ResourceCard::new(basic(n), name, 1).into())
        .collect()
}

fn level_one_resources() -> Vec<Card> {
    vec![
        ResourceCard::new(l1(1), "Plank", 2)
            .with_cost(cost([[basic(1), basic(1)], [basic(1), basic(4)]]))
            .into(),
        ResourceCard::new(l1(2), "Ingot", 2)
            .with_cost(cost([[basic(2), basic(2)]]))
            .with_capital(CostOptions::capital([basic(2), basic(2), basic(2)]))
            .into(),
        ResourceCard::new(l1(3), "Flour", 2)
            .with_cost(cost([[basic(3), basic(3)]]))
            .into(),
        ResourceCard::new(l1(4), "Brick", 2)
            .with_cost(cost([[basic(4), basic(4)], [basic(4), basic(2)]]))
            .into(),
        ResourceCard::new(l1(5), "Cloth", 2)
            .with_cost(cost([[basic(1), basic(3)]]))
            .with_capital(CostOptions::capital([basic(3), basic(3), basic(3)]))
            .into(),
    ]
}

fn level_two_resources() -> Vec<Card> {
    vec![
        ResourceCard::new(l2(1), "Furniture", 4)
            .with_cost(cost([[l1(1), l1(1)]]))
            .into(),
        ResourceCard::new(l2(2), "Tools", 4)
            .with_cost(cost([[l1(2), l1(1)]]))
            .into(),
        ResourceCard::new(l2(3), "Bread", 4)
            .with_cost(cost([[l1(3), l1(3)]]))
            .into(),
        ResourceCard::new(l2(4), "Pottery", 4)
            .with_cost(cost([[l1(4), l1(4)]]))
            .into(),
        ResourceCard::new(l2(5), "Garment", 4)
            .with_cost(cost([[l1(5), l1(5)]]))
            .with_capital(CostOptions::capital([l1(5), l1(5), l1(5)]))
            .into(),
        ResourceCard::new(l2(6), "Jewelry", 4)
            .with_cost(cost([[l1(2), l1(2)], [l1(2), l1(4)]]))
            .into(),
    ]
}

fn buildings() -> Vec<Card> {
    let b = CardIdentity::building;
    vec![
        BuildingCard::new(b(1), "Sawmill", 3)
            .with_cost(cost([[basic(1), basic(1), basic(2)]]))
            .with_points(1)
            .with_effect_cost(cost([[basic(1), basic(1)]]))
            .with_effect_product(l1(1))
            .starting()
            .into(),
        BuildingCard::new(b(2), "Mill", 3)
            .with_cost(cost([[basic(3), basic(3), basic(2)]]))
            .with_points(1)
            .with_effect_capital(CostOptions::capital([basic(3)]))
            .with_effect_product(l1(3))
            .starting()
            .into(),
        BuildingCard::new(b(3), "Kiln", 3)
            .with_cost(cost([[basic(4), basic(4), basic(1)]]))
            .with_points(1)
            .with_effect_cost(cost([[basic(4)]]))
            .with_effect_points(2)
            .starting()
            .into(),
        BuildingCard::new(b(4), "Market Hall", 3)
            .with_cost(cost([[l1(1), l1(4)]]))
            .with_points(2)
            .with_effect_cost(cost([[basic(1), basic(2), basic(3)]]))
            .with_effect_points(1)
            .into(),
        BuildingCard::new(b(5), "Forge", 3)
            .with_cost(cost([[l1(2), l1(2)]]))
            .with_points(2)
            .with_effect_capital(CostOptions::capital([l1(2), l1(2)]))
            .with_effect_product(l2(2))
            .into(),
        BuildingCard::new(b(6), "Weaver", 3)
            .with_cost(cost([[l1(5), l1(3)]]))
            .with_points(2)
            .with_effect_cost(cost([[l1(5), l1(5)]]))
            .with_effect_product(l2(5))
            .into(),
        BuildingCard::new(b(7), "Cathedral", 3)
            .with_cost(cost([[l2(1), l2(3)], [l2(4), l2(6)]]))
            .with_points(5)
            .into(),
        BuildingCard::new(b(8), "Guild House", 3)
            .with_cost(cost([[l2(2), l1(1)]]))
            .with_points(3)
            .with_effect_cost(cost([[l1(4)]]))
            .with_effect_points(2)
            .extension()
            .into(),
    ]
}

/// Every template of the built-in catalog.
#[must_use]
pub fn sample_cards() -> Vec<Card> {
    let mut cards = basic_resources();
    cards.extend(level_one_resources());
    cards.extend(level_two_resources());
    cards.extend(buildings());
    cards
}

/// The built-in catalog.
///
/// # Panics
///
/// Never for the built-in data, which registers without conflicts.
#[must_use]
pub fn sample_catalog() -> Catalog {
    match Catalog::from_cards(sample_cards()) {
        Ok(catalog) => catalog,
        Err(err) => panic!("built-in catalog is inconsistent: {err}"),
    }
}

/// Copy counts for the built-in catalog.
///
/// Basic resources scale with players; every higher-tier card is unique.
#[must_use]
pub fn sample_quantities() -> QuantityTable {
    let mut table = QuantityTable::new();
    for card in sample_cards() {
        let identity = card.identity();
        match identity.category {
            Category::BasicResource => table.set(identity, [5, 6, 7]),
            Category::LevelOneResource => table.set(identity, [4, 5, 6]),
            _ => table.set_flat(identity, 1),
        }
    }
    table
}

/// Deck factory over the built-in catalog.
#[must_use]
pub fn sample_factory() -> DeckFactory {
    match DeckFactory::new(sample_catalog(), sample_quantities()) {
        Ok(factory) => factory,
        Err(err) => panic!("built-in quantities are incomplete: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = sample_catalog();

        assert_eq!(catalog.templates(Category::BasicResource).len(), 4);
        assert_eq!(catalog.templates(Category::LevelOneResource).len(), 5);
        assert_eq!(catalog.templates(Category::LevelTwoResource).len(), 6);
        assert_eq!(catalog.templates(Category::Building).len(), 8);
        assert_eq!(catalog.max_type_number(Category::Building), 8);
    }

    #[test]
    fn test_costs_name_known_cards() {
        let catalog = sample_catalog();

        for card in catalog.iter() {
            for identity in card.cost().identities() {
                assert!(catalog.contains(identity), "{} costs unknown {}", card.name(), identity);
            }
            if let Some(building) = card.as_building() {
                if let Some(product) = building.effect_product {
                    assert!(catalog.contains(product));
                }
            }
        }
    }

    #[test]
    fn test_three_starting_buildings() {
        let starting = sample_catalog()
            .templates(Category::Building)
            .iter()
            .filter_map(Card::as_building)
            .filter(|building| building.is_starting_building)
            .count();
        assert_eq!(starting, 3);
    }

    #[test]
    fn test_factory_quantities() {
        let factory = sample_factory();
        assert_eq!(factory.quantities().quantity(basic(1), 4), Ok(7));
        assert_eq!(factory.quantities().quantity(l2(3), 2), Ok(1));
    }
}
