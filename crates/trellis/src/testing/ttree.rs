//! A standard tree of instrumented widgets for tests.
//!
//! The fixture is a root over two branches of two leaves each, split evenly:
//! the root lays its branches out side by side, each branch stacks its
//! leaves. Over 100x100 app bounds the leaves quarter the surface. Every
//! widget records the input events it sees in a thread-local log and answers
//! with a scripted outcome, so dispatch-order tests read as path assertions.

use std::cell::RefCell;

use geom::{Point, Rect};

use crate::app::App;
use crate::context::Context;
use crate::error::Result;
use crate::id::{TypedId, WidgetId};
use crate::layout::{Item, Linear, Sizing};
use crate::testing::TestRuntime;
use crate::widget::{ChildList, InputOutcome, Widget};

/// Event log recorded by the instrumented widgets.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct State {
    /// Recorded entries, in dispatch order.
    pub path: Vec<String>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// An empty log.
    pub fn new() -> Self {
        Self { path: vec![] }
    }

    /// Clear recorded entries.
    pub fn reset(&mut self) {
        self.path = vec![];
    }

    /// Record one dispatched event and its outcome.
    pub fn add_event(&mut self, name: &str, event: &str, outcome: InputOutcome) {
        let outcome = match outcome {
            InputOutcome::Handle => "handle",
            InputOutcome::Abort => "abort",
            InputOutcome::Ignore => "ignore",
        };
        self.path.push(format!("{name}@{event}->{outcome}"));
    }
}

thread_local! {
    /// Log shared by every instrumented widget on this thread.
    pub(crate) static TSTATE: RefCell<State> = RefCell::new(State::new());
}

/// Clear the shared log.
pub fn reset_state() {
    TSTATE.with(|s| {
        s.borrow_mut().reset();
    });
}

/// A copy of the shared log.
pub fn get_state() -> State {
    TSTATE.with(|s| s.borrow().clone())
}

/// Lets tests script the next input outcome on a widget.
pub trait OutcomeTarget {
    /// Answer the next input event with `outcome`.
    fn set_outcome(&mut self, outcome: InputOutcome);
}

/// Generate an instrumented leaf widget type.
macro_rules! leaf {
    ($name:ident) => {
        /// Instrumented leaf widget.
        #[derive(Debug)]
        pub struct $name {
            /// Outcome for the next input event, consumed when it fires.
            pub next_outcome: Option<InputOutcome>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            /// A leaf with no scripted outcome.
            pub fn new() -> Self {
                $name { next_outcome: None }
            }

            /// Record `event` and answer with the scripted outcome.
            fn handle(&mut self, event: &str) -> InputOutcome {
                let outcome = self.next_outcome.take().unwrap_or(InputOutcome::Ignore);
                let name = self.name();
                TSTATE.with(|s| {
                    s.borrow_mut().add_event(&name, event, outcome);
                });
                outcome
            }
        }

        impl Widget for $name {
            fn handle_pointing_input(&mut self, _ctx: &mut Context<'_>) -> InputOutcome {
                self.handle("pointing")
            }

            fn handle_button_input(&mut self, _ctx: &mut Context<'_>) -> InputOutcome {
                self.handle("button")
            }
        }

        impl OutcomeTarget for $name {
            fn set_outcome(&mut self, outcome: InputOutcome) {
                self.next_outcome = Some(outcome);
            }
        }
    };
}

/// Generate an instrumented branch widget type that stacks its children.
macro_rules! branch {
    ($name:ident) => {
        /// Instrumented branch widget; stacks its children vertically.
        #[derive(Debug)]
        pub struct $name {
            /// Children appended every frame.
            pub kids: Vec<WidgetId>,
            /// Outcome for the next input event, consumed when it fires.
            pub next_outcome: Option<InputOutcome>,
        }

        impl $name {
            /// A branch over `kids`.
            pub fn new(kids: Vec<WidgetId>) -> Self {
                $name {
                    kids,
                    next_outcome: None,
                }
            }

            /// Record `event` and answer with the scripted outcome.
            fn handle(&mut self, event: &str) -> InputOutcome {
                let outcome = self.next_outcome.take().unwrap_or(InputOutcome::Ignore);
                let name = self.name();
                TSTATE.with(|s| {
                    s.borrow_mut().add_event(&name, event, outcome);
                });
                outcome
            }
        }

        impl Widget for $name {
            fn append_child_widgets(&mut self, _ctx: &mut Context<'_>, children: &mut ChildList) {
                for kid in &self.kids {
                    children.append(*kid);
                }
            }

            fn layout(&self, ctx: &mut Context<'_>, child: WidgetId) -> Rect {
                let bounds = ctx.bounds(ctx.widget_id());
                let stack = Linear::vertical()
                    .items(self.kids.iter().map(|k| Item::widget(*k, Sizing::Flex(1))));
                stack.widget_bounds(ctx, bounds, child)
            }

            fn handle_pointing_input(&mut self, _ctx: &mut Context<'_>) -> InputOutcome {
                self.handle("pointing")
            }

            fn handle_button_input(&mut self, _ctx: &mut Context<'_>) -> InputOutcome {
                self.handle("button")
            }
        }

        impl OutcomeTarget for $name {
            fn set_outcome(&mut self, outcome: InputOutcome) {
                self.next_outcome = Some(outcome);
            }
        }
    };
}

leaf!(BaLa);
leaf!(BaLb);
leaf!(BbLa);
leaf!(BbLb);
branch!(Ba);
branch!(Bb);

/// Instrumented root widget; lays its branches out side by side.
pub struct R {
    /// Children appended every frame.
    pub kids: Vec<WidgetId>,
    /// Outcome for the next input event, consumed when it fires.
    pub next_outcome: Option<InputOutcome>,
}

impl R {
    /// A root over `kids`.
    pub fn new(kids: Vec<WidgetId>) -> Self {
        R {
            kids,
            next_outcome: None,
        }
    }

    /// Record `event` and answer with the scripted outcome.
    fn handle(&mut self, event: &str) -> InputOutcome {
        let outcome = self.next_outcome.take().unwrap_or(InputOutcome::Ignore);
        let name = self.name();
        TSTATE.with(|s| {
            s.borrow_mut().add_event(&name, event, outcome);
        });
        outcome
    }
}

impl Widget for R {
    fn append_child_widgets(&mut self, _ctx: &mut Context<'_>, children: &mut ChildList) {
        for kid in &self.kids {
            children.append(*kid);
        }
    }

    fn layout(&self, ctx: &mut Context<'_>, child: WidgetId) -> Rect {
        let bounds = ctx.bounds(ctx.widget_id());
        let row = Linear::horizontal()
            .items(self.kids.iter().map(|k| Item::widget(*k, Sizing::Flex(1))));
        row.widget_bounds(ctx, bounds, child)
    }

    fn handle_pointing_input(&mut self, _ctx: &mut Context<'_>) -> InputOutcome {
        self.handle("pointing")
    }

    fn handle_button_input(&mut self, _ctx: &mut Context<'_>) -> InputOutcome {
        self.handle("button")
    }
}

impl OutcomeTarget for R {
    fn set_outcome(&mut self, outcome: InputOutcome) {
        self.next_outcome = Some(outcome);
    }
}

/// Ids of the standard test tree.
#[derive(Debug, Clone, Copy)]
pub struct TestTree {
    /// The root.
    pub root: WidgetId,
    /// Left branch.
    pub a: TypedId<Ba>,
    /// Right branch.
    pub b: TypedId<Bb>,
    /// Top-left leaf.
    pub a_a: TypedId<BaLa>,
    /// Bottom-left leaf.
    pub a_b: TypedId<BaLb>,
    /// Top-right leaf.
    pub b_a: TypedId<BbLa>,
    /// Bottom-right leaf.
    pub b_b: TypedId<BbLb>,
}

/// Build the standard fixture over 100x100 bounds, run one frame so the tree
/// is live, then hand control to `func` with a cleared log.
///
/// The runtime's cursor starts off-surface, so frames dispatch no pointing
/// input until a test moves it.
pub fn run_ttree(
    func: impl FnOnce(&mut App, &mut TestRuntime, TestTree) -> Result<()>,
) -> Result<()> {
    let mut app = App::new(R::new(vec![]));
    let a_a = app.insert_typed(BaLa::new());
    let a_b = app.insert_typed(BaLb::new());
    let b_a = app.insert_typed(BbLa::new());
    let b_b = app.insert_typed(BbLb::new());
    let a = app.insert_typed(Ba::new(vec![a_a.into(), a_b.into()]));
    let b = app.insert_typed(Bb::new(vec![b_a.into(), b_b.into()]));
    app.root_as_mut::<R>()?.kids = vec![a.into(), b.into()];
    app.set_bounds(Rect::new(0, 0, 100, 100));

    let tree = TestTree {
        root: app.root(),
        a,
        b,
        a_a,
        a_b,
        b_a,
        b_b,
    };

    let mut rt = TestRuntime::new();
    rt.cursor = Point::new(-10, -10);
    app.frame(&rt)?;
    reset_state();
    func(&mut app, &mut rt, tree)
}
