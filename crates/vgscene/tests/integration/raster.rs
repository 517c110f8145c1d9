use crate::{parse, rasterize, SCENE};

#[test]
fn solid_fill() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <rect width='20' height='20' fill='#ff0000'/>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    let c = pixmap.pixel(10, 10).unwrap();
    assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (255, 0, 0, 255));
}

#[test]
fn opacity() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <rect width='20' height='20' fill='blue' fill-opacity='0.5'/>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    let c = pixmap.pixel(10, 10).unwrap();
    assert!((126..=129).contains(&c.alpha()));
    assert_eq!(c.red(), 0);
}

#[test]
fn transformed_group() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <g transform='translate(10 10)'>
            <rect width='10' height='10' fill='green'/>
        </g>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    assert_eq!(pixmap.pixel(5, 5).unwrap().alpha(), 0);
    assert_eq!(pixmap.pixel(15, 15).unwrap().alpha(), 255);
}

#[test]
fn stroke_is_on_top() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <rect x='5' y='5' width='10' height='10' fill='red' stroke='blue' stroke-width='4'/>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    let c = pixmap.pixel(5, 10).unwrap();
    assert_eq!((c.red(), c.blue()), (0, 255));
    let c = pixmap.pixel(10, 10).unwrap();
    assert_eq!((c.red(), c.blue()), (255, 0));
}

#[test]
fn gradient() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='40' height='40'>
        <linearGradient id='lg1' x2='20'>
            <stop offset='0' stop-color='red'/>
            <stop offset='1' stop-color='blue'/>
        </linearGradient>
        <g transform='translate(10 10)'>
            <rect width='20' height='20' fill='url(#lg1)'/>
        </g>
    </svg>
    ");
    let pixmap = rasterize(&scene, 40, 40);

    // The gradient is in the rect's user space, so it spans device x 10..30.
    let left = pixmap.pixel(12, 20).unwrap();
    let right = pixmap.pixel(28, 20).unwrap();
    assert!(left.red() > left.blue());
    assert!(right.blue() > right.red());
}

#[test]
fn gradient_follows_group_transform() {
    let scene = parse(SCENE);
    let pixmap = rasterize(&scene, 40, 40);

    // `lg1` ends at local x=40, so the middle of the rect is still mostly red.
    let middle = pixmap.pixel(20, 20).unwrap();
    assert!(middle.red() > middle.blue());
}

#[test]
fn symbol_is_drawn_through_use() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <symbol id='sym' fill='green'>
            <rect width='10' height='10'/>
        </symbol>
        <use href='#sym' x='10'/>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    assert_eq!(pixmap.pixel(5, 5).unwrap().alpha(), 0);
    let c = pixmap.pixel(15, 5).unwrap();
    assert_eq!((c.green(), c.alpha()), (128, 255));
}

#[test]
fn rounded_rect_corners() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <rect width='20' height='20' rx='8' fill='black'/>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
    assert_eq!(pixmap.pixel(10, 10).unwrap().alpha(), 255);
}

#[test]
fn rescaled_render() {
    let mut scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle cx='5' cy='5' r='5' fill='black'/>
    </svg>
    ");

    assert_eq!(scene.rescale_to_fit(100.0, 100.0), 10.0);

    let pixmap = rasterize(&scene, 100, 100);
    assert_eq!(pixmap.pixel(50, 50).unwrap().alpha(), 255);
    assert_eq!(pixmap.pixel(2, 2).unwrap().alpha(), 0);
}

#[test]
fn text_is_not_rasterized() {
    let scene = parse("
    <svg xmlns='http://www.w3.org/2000/svg' width='20' height='20'>
        <text x='0' y='15' font-size='20'>W</text>
    </svg>
    ");

    let pixmap = rasterize(&scene, 20, 20);
    assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
}
