use panel_data::{Gender, ReferenceCatalog};

fn main() {
    let catalog = ReferenceCatalog::standard();
    let (tests, abnormalities) = catalog.counts();

    println!("=== Reference Catalog ===");
    println!("Analytes: {}", tests);
    println!("Abnormalities: {}\n", abnormalities);

    for test in catalog.tests() {
        let male = test.ranges.for_gender(Some(Gender::Male));
        let female = test.ranges.for_gender(Some(Gender::Female));
        match (male, female) {
            (Some(m), Some(f)) if m != f => {
                println!("{:<12} {:<45} M {} / F {} {}", test.code, test.name, m, f, test.units)
            }
            (Some(m), _) => println!("{:<12} {:<45} {} {}", test.code, test.name, m, test.units),
            _ => {}
        }
    }
}
