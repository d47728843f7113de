use shelfpack::{Island, PackingContext, ShelfPacker};

fn main() {
    env_logger::init();

    let mut islands: Vec<_> = (0..12).map(|_| Island::new((0.2, 0.15))).collect();

    let context = PackingContext::new(1.0).padding(0.01);
    let result = ShelfPacker::new().pack(&mut islands, &context);

    println!("Pack result: {:#?}", result);
    println!("Islands: {:#?}", islands);
}
