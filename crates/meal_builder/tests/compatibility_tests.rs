mod common;

use common::{catalog, create_test_food, food_by_id};
use meal_builder::{compatible, group_compatible, Category};

#[test]
fn test_same_lean_protein_category_is_incompatible() {
    let chicken = create_test_food(
        1,
        "Frango",
        Category::ProteinasMagras,
        100.0,
        (31.0, 0.0, 3.6),
        "almoco",
        Some(2),
    );
    let tilapia = create_test_food(
        2,
        "Tilapia",
        Category::ProteinasMagras,
        100.0,
        (26.0, 0.0, 2.7),
        "almoco",
        Some(2),
    );

    assert!(!compatible(&chicken, &tilapia));
}

#[test]
fn test_compatibility_is_symmetric_across_catalog() {
    let foods = catalog();
    for a in &foods {
        for b in &foods {
            assert_eq!(
                compatible(a, b),
                compatible(b, a),
                "asymmetric for {} / {}",
                a.name,
                b.name
            );
        }
    }
}

#[test]
fn test_fixture_relations() {
    let foods = catalog();
    let chicken = food_by_id(&foods, 1);
    let rice = food_by_id(&foods, 2);
    let egg = food_by_id(&foods, 4);
    let whey = food_by_id(&foods, 8);
    let banana = food_by_id(&foods, 9);
    let yogurt = food_by_id(&foods, 13);

    assert!(compatible(chicken, rice));
    // lunch vs breakfast
    assert!(!compatible(chicken, egg));
    // universal joins any context
    assert!(compatible(whey, egg));
    assert!(compatible(whey, chicken));
    // banana lists dairy as incompatible
    assert!(!compatible(banana, yogurt));
    assert!(compatible(banana, egg));
}

#[test]
fn test_group_compatible_on_fixture() {
    let foods = catalog();
    let chicken = food_by_id(&foods, 1);
    let rice = food_by_id(&foods, 2);
    let avocado = food_by_id(&foods, 3);
    let sweet_potato = food_by_id(&foods, 7);

    assert!(group_compatible(&[chicken, rice, avocado]));
    assert!(!group_compatible(&[chicken, rice, sweet_potato]));
}
