use vgscene::DrawCommand;
use vgtree::vgtypes::Transform;
use vgtree::{FigureKind, NodeState, Shape};

use crate::{is_balanced, parse, record, record_str, SCENE, SCENE_COMMANDS};

fn draw_calls(commands: &[DrawCommand]) -> Vec<&DrawCommand> {
    commands
        .iter()
        .filter(|c| {
            matches!(
                c,
                DrawCommand::FillShape(..) | DrawCommand::StrokeShape(..) | DrawCommand::DrawText(..)
            )
        })
        .collect()
}

#[test]
fn group_order() {
    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='translate(10 20)'>
            <rect width='10' height='10' fill='red' stroke='blue'/>
        </g>
    </svg>
    ");

    assert_eq!(commands.len(), 9);
    assert_eq!(commands[0], DrawCommand::Save);
    assert_eq!(commands[1], DrawCommand::Save);
    assert_eq!(commands[2], DrawCommand::Concat(Transform::from_translate(10.0, 20.0)));
    assert_eq!(commands[3], DrawCommand::Save);
    assert!(matches!(commands[4], DrawCommand::FillShape(Shape::Rect { .. }, _)));
    assert!(matches!(commands[5], DrawCommand::StrokeShape(Shape::Rect { .. }, _)));
    assert_eq!(&commands[6..], &[DrawCommand::Restore, DrawCommand::Restore, DrawCommand::Restore]);
}

#[test]
fn fill_before_stroke() {
    let calls = draw_calls(&SCENE_COMMANDS);
    assert!(matches!(calls[0], DrawCommand::FillShape(..)));
    assert!(matches!(calls[1], DrawCommand::StrokeShape(..)));

    match calls[1] {
        DrawCommand::StrokeShape(_, ref paint) => assert_eq!(paint.width, 1.0),
        _ => unreachable!(),
    }
}

#[test]
fn hidden_elements_are_skipped() {
    let has_circle = SCENE_COMMANDS
        .iter()
        .any(|c| matches!(c, DrawCommand::FillShape(Shape::Circle { .. }, _)));
    assert!(!has_circle);

    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g display='none'>
            <rect width='10' height='10'/>
        </g>
    </svg>
    ");
    assert!(draw_calls(&commands).is_empty());

    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect width='10' height='10' display='none'>
            <rect width='5' height='5'/>
        </rect>
    </svg>
    ");
    assert!(draw_calls(&commands).is_empty());
}

#[test]
fn symbol_is_drawn_through_use() {
    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <symbol id='sym'>
            <rect width='10' height='10'/>
        </symbol>
        <use href='#sym' x='5'/>
    </svg>
    ");

    let calls = draw_calls(&commands);
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], DrawCommand::FillShape(Shape::Rect { width, .. }, _) if *width == 10.0));
    assert!(commands.contains(&DrawCommand::Concat(Transform::from_translate(5.0, 0.0))));
}

#[test]
fn defs_are_not_drawn() {
    // The gradient rect, its stroke and the `use` clone.
    assert_eq!(draw_calls(&SCENE_COMMANDS).len(), 3);
}

#[test]
fn use_is_translated() {
    let translate = DrawCommand::Concat(Transform::from_translate(30.0, 0.0));
    let pos = SCENE_COMMANDS.iter().position(|c| *c == translate).unwrap();
    assert!(SCENE_COMMANDS[pos..]
        .iter()
        .any(|c| matches!(c, DrawCommand::FillShape(Shape::Rect { width, .. }, _) if *width == 10.0)));
}

#[test]
fn gradient_paint() {
    match draw_calls(&SCENE_COMMANDS)[0] {
        DrawCommand::FillShape(_, ref paint) => {
            let shader = paint.shader.as_ref().unwrap();
            assert_eq!(shader.id, "lg1");
            assert_eq!(shader.stops.len(), 2);
        }
        _ => unreachable!(),
    }
}

#[test]
fn saves_are_balanced() {
    assert!(is_balanced(&SCENE_COMMANDS));

    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g><g transform='scale(2)'><g display='none'><rect width='1' height='1'/></g></g></g>
        <path d='M 0 0 L 10 10' stroke='red' transform='rotate(45)'/>
    </svg>
    ");
    assert!(is_balanced(&commands));
}

#[test]
fn text_is_drawn() {
    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text x='5' y='10' font-size='12' text-anchor='middle'>Hello</text>
    </svg>
    ");

    let calls = draw_calls(&commands);
    assert_eq!(calls.len(), 1);
    match calls[0] {
        DrawCommand::DrawText(ref text, ref paint) => {
            assert_eq!(text.content, "Hello");
            assert_eq!(text.font.size, 12.0);
            assert_eq!((text.x, text.y), (5.0, 10.0));
            assert!(paint.shader.is_none());
        }
        _ => unreachable!(),
    }
}

#[test]
fn lines_are_only_stroked() {
    let commands = record_str("
    <svg xmlns='http://www.w3.org/2000/svg'>
        <line x2='10' y2='10' fill='red' stroke='blue'/>
        <line x2='10' y2='10'/>
    </svg>
    ");

    let calls = draw_calls(&commands);
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], DrawCommand::StrokeShape(Shape::Line { .. }, _)));
}

#[test]
fn rescale_is_idempotent() {
    let mut scene1 = parse(SCENE);
    scene1.rescale_to_fit(60.0, 60.0);

    let mut scene2 = parse(SCENE);
    scene2.rescale_to_fit(60.0, 60.0);
    scene2.rescale_to_fit(60.0, 60.0);

    assert_eq!(scene1.scale(), 2.0);
    assert_eq!(record(&scene1), record(&scene2));
    assert_ne!(record(&scene1), *SCENE_COMMANDS);
}

#[test]
fn rescale_scales_paint() {
    let mut scene = parse(SCENE);
    scene.rescale_to_fit(60.0, 60.0);

    let rect = match *scene.document().element_by_id("rect1").unwrap().state() {
        NodeState::Figure(ref figure) => figure.clone(),
        _ => unreachable!(),
    };

    assert_eq!(rect.stroke.as_ref().unwrap().width, 2.0);
    assert!(matches!(rect.kind, FigureKind::Shape(Shape::Rect { width, .. }) if width == 40.0));
    assert_eq!(scene.size().width(), 80.0);
}

#[test]
fn broken_document_draws_nothing() {
    assert!(vgscene::Scene::from_str("<svg", &vgtree::Options::default()).is_err());

    let commands = record_str("<svg xmlns='http://www.w3.org/2000/svg'/>");
    assert_eq!(commands, vec![DrawCommand::Save, DrawCommand::Restore]);
}
