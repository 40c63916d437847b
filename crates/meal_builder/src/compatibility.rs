use crate::food::Food;

/// Decide whether two foods may share a meal.
///
/// First matching rule wins:
/// 1. either food is universal => compatible
/// 2. no shared context tag => incompatible
/// 3. one food lists the other's category or name as incompatible => incompatible
/// 4. same category => incompatible
/// 5. otherwise compatible
pub fn compatible(a: &Food, b: &Food) -> bool {
    if a.is_universal() || b.is_universal() {
        return true;
    }

    let shares_context = a.context_tags().any(|tag| b.has_context_tag(tag));
    if !shares_context {
        return false;
    }

    if excludes(a, b) || excludes(b, a) {
        return false;
    }

    a.category != b.category
}

/// True iff every unordered pair in `foods` is compatible
pub fn group_compatible(foods: &[&Food]) -> bool {
    foods.iter().enumerate().all(|(i, a)| {
        foods[i + 1..]
            .iter()
            .all(|b| compatible(a, b))
    })
}

fn excludes(food: &Food, other: &Food) -> bool {
    let other_category = other.category.as_ref();
    food.incompatibilities()
        .any(|entry| entry == other_category || entry == other.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::Category;

    fn food(id: i64, name: &str, category: Category, context: &str, incompatible: &str) -> Food {
        Food {
            id,
            name: name.to_string(),
            category,
            portion_g: 100.0,
            kcal: 100.0,
            protein: 10.0,
            carb: 10.0,
            fat: 1.0,
            culinary_context: context.to_string(),
            incompatible_with: incompatible.to_string(),
            cluster: None,
        }
    }

    #[test]
    fn test_universal_overrides_everything() {
        let whey = food(1, "Whey", Category::Suplementos, "universal", "");
        let fish = food(2, "Tilapia", Category::ProteinasMagras, "jantar", "Whey");
        assert!(compatible(&whey, &fish));
        assert!(compatible(&fish, &whey));
    }

    #[test]
    fn test_requires_shared_context() {
        let oats = food(1, "Aveia", Category::CarboidratosComplexos, "cafe_manha", "");
        let beef = food(2, "Patinho", Category::ProteinasMagras, "almoco, jantar", "");
        assert!(!compatible(&oats, &beef));
    }

    #[test]
    fn test_incompatibility_by_category_and_name() {
        let milk = food(1, "Leite", Category::Laticinios, "cafe_manha", "frutas");
        let mango = food(2, "Manga", Category::Frutas, "cafe_manha", "");
        assert!(!compatible(&milk, &mango));
        assert!(!compatible(&mango, &milk));

        let bread = food(3, "Pao frances", Category::CarboidratosSimples, "cafe_manha", "");
        let egg = food(4, "Ovo", Category::ProteinasGordas, "cafe_manha", "Pao frances");
        assert!(!compatible(&bread, &egg));
        assert!(!compatible(&egg, &bread));
    }

    #[test]
    fn test_same_category_is_incompatible() {
        let chicken = food(1, "Frango", Category::ProteinasMagras, "almoco", "");
        let tilapia = food(2, "Tilapia", Category::ProteinasMagras, "almoco", "");
        assert!(!compatible(&chicken, &tilapia));
    }

    #[test]
    fn test_group_compatible_checks_every_pair() {
        let chicken = food(1, "Frango", Category::ProteinasMagras, "almoco", "");
        let rice = food(2, "Arroz", Category::CarboidratosComplexos, "almoco", "");
        let olive = food(3, "Azeite", Category::GordurasSaudaveis, "almoco", "");
        let juice = food(4, "Suco", Category::Bebidas, "cafe_manha", "");

        assert!(group_compatible(&[&chicken, &rice, &olive]));
        assert!(!group_compatible(&[&chicken, &rice, &juice]));
        assert!(group_compatible(&[&chicken]));
        assert!(group_compatible(&[]));
    }
}
