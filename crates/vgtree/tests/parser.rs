use std::time::Duration;

use vgtree::vgtypes::{PathSegment, Rect};
use vgtree::{Document, EId, FigureKind, NodeState, Options, Shape, ShaderKind};

fn parse(svg: &str) -> Document {
    Document::parse_str(svg, &Options::default()).unwrap()
}

fn figure<'a>(doc: &'a Document, id: &str) -> &'a vgtree::Figure {
    match *doc.element_by_id(id).unwrap().state() {
        NodeState::Figure(ref figure) => figure.as_ref(),
        _ => panic!("'{}' is not a figure", id),
    }
}

#[test]
fn radial_gradient_inherits_linear_stops() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
        <linearGradient id='lg1'>
            <stop offset='0' stop-color='#f00'/>
            <stop offset='0.5' stop-color='#0f0'/>
            <stop offset='1' stop-color='#00f'/>
        </linearGradient>
        <radialGradient id='rg1' xlink:href='#lg1' cx='1' cy='2' r='3'/>
        <rect id='rect1' width='10' height='10' fill='url(#rg1)'/>
    </svg>
    ";

    let doc = parse(svg);
    let fill = figure(&doc, "rect1").fill.as_ref().unwrap();
    let shader = fill.shader.as_ref().unwrap();
    assert_eq!(shader.id, "rg1");
    assert_eq!(shader.stops.len(), 3);
    assert_eq!(shader.kind, ShaderKind::Radial { cx: 1.0, cy: 2.0, r: 3.0 });
}

#[test]
fn use_with_undefined_reference() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
        <use id='use1' xlink:href='#missing'/>
    </svg>
    ";

    let doc = parse(svg);
    let use_node = doc.element_by_id("use1").unwrap();
    let group = use_node.first_element_child().unwrap();
    assert_eq!(group.tag_name(), Some(EId::G));
    assert!(!group.has_children());
    assert!(doc.bbox().is_empty());
}

#[test]
fn recursive_use() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
        <g id='g1'>
            <rect width='10' height='10'/>
            <use xlink:href='#g1'/>
        </g>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn nested_use() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
        <defs>
            <rect id='rect1' width='10' height='10'/>
            <use id='use1' xlink:href='#rect1' x='10'/>
        </defs>
        <use xlink:href='#use1' y='20'/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(10.0, 20.0, 20.0, 30.0));
}

#[test]
fn malformed_nesting_is_fatal() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><g></svg>";
    assert!(Document::parse_str(svg, &Options::default()).is_err());
}

#[test]
fn not_svg() {
    let err = Document::parse_str("<html/>", &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "document doesn't have a root 'svg' element");
}

#[test]
fn not_utf8() {
    let err = Document::parse_data(&[0xff, 0xfe, 0x00], &Options::default()).unwrap_err();
    assert!(matches!(err, vgtree::Error::NotAnUtf8Str));
}

#[test]
fn animation_delay() {
    let doc = parse("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10'>
            <animate attributeName='x' from='0' to='10' dur='1s'/>
        </rect>
    </svg>
    ");
    assert!(doc.has_animation());
    assert_eq!(doc.delay(), Some(Duration::from_millis(300)));

    let doc = parse("<svg xmlns='http://www.w3.org/2000/svg'><set/></svg>");
    assert!(doc.has_animation());

    let doc = parse("<svg xmlns='http://www.w3.org/2000/svg'><rect/></svg>");
    assert!(!doc.has_animation());
    assert_eq!(doc.delay(), None);
}

#[test]
fn closed_rect_path_bbox() {
    let doc = parse("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path d='M0,0 L10,0 L10,10 L0,10 Z'/>
    </svg>
    ");
    assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn smooth_cubic() {
    let doc = parse("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path id='path1' d='M0,0 C0,0 10,0 10,10 S20,20 20,0'/>
    </svg>
    ");

    let path = match figure(&doc, "path1").kind {
        FigureKind::Shape(Shape::Path(ref path)) => path,
        _ => unreachable!(),
    };

    match path.segments()[2] {
        PathSegment::CubicTo { x1, y1, .. } => {
            assert_eq!((x1, y1), (10.0, 20.0));
        }
        _ => unreachable!(),
    }
}

#[test]
fn unknown_elements_and_attributes_are_ignored() {
    let doc = parse("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <qwe><rect width='100' height='100'/></qwe>
        <rect id='rect1' width='10' height='10' qwe='1'/>
    </svg>
    ");
    assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0));
    assert_eq!(doc.element_by_id("rect1").unwrap().attributes().len(), 3);
}

#[test]
fn bad_attributes_are_recovered() {
    let doc = parse("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='10' transform='qwe(1)' fill='#zz'/>
        <path id='path1' d='M 0 0 L 10 1e L 20 20'/>
    </svg>
    ");

    let rect = figure(&doc, "rect1");
    assert!(rect.transform.is_none());
    assert!(rect.fill.as_ref().unwrap().color.is_transparent());

    match figure(&doc, "path1").kind {
        FigureKind::Shape(Shape::Path(ref path)) => assert_eq!(path.len(), 1),
        _ => unreachable!(),
    }
}

#[test]
fn rescale_is_idempotent() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='translate(5 5)'>
            <circle id='circle1' cx='10' cy='10' r='10' stroke='black'/>
        </g>
    </svg>
    ";

    let mut doc1 = parse(svg);
    doc1.rescale_to_fit(200.0, 100.0);

    let mut doc2 = parse(svg);
    doc2.rescale_to_fit(200.0, 100.0);
    doc2.rescale_to_fit(200.0, 100.0);

    assert_eq!(doc1.scale(), 5.0);
    assert_eq!(doc1.bbox(), doc2.bbox());
    assert_eq!(figure(&doc1, "circle1"), figure(&doc2, "circle1"));
    assert_eq!(doc1.bbox().to_rect().unwrap(), Rect::from_ltrb(25.0, 25.0, 125.0, 125.0));
}

#[test]
fn document_is_send() {
    fn ensure_send<T: Send>() {}
    ensure_send::<Document>();
}

#[test]
fn symbol_content_through_use() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <symbol id='sym'>
            <rect width='10' height='10'/>
        </symbol>
        <use href='#sym' x='5'/>
    </svg>
    ";

    let doc = parse(svg);
    assert_eq!(doc.bbox().to_rect().unwrap(), Rect::from_xywh(5.0, 0.0, 10.0, 10.0));
}
