//! The typed AST surface.
//!
//! Evaluation lowers every deferred computation to one of these nodes; the
//! backend consumes them. Nodes are shared (`Rc<RefCell<_>>`) because
//! recursion stubs are installed before a function body finishes compiling
//! and later patched, and because `Named` lowering retags a clone of an
//! existing node.
//!
//! An [`AstKind::Overload`] node carries the *full* candidate table —
//! builtin or instantiation per member type — so code generation can pick
//! the concrete target when dispatch was deferred past the evaluator.

use crate::builtin::Builtin;
use crate::func::InstTable;
use basil_base::{Pos, Symbol};
use basil_types::Type;
use std::cell::RefCell;
use std::rc::Rc;

pub type Ast = Rc<RefCell<AstNode>>;

/// A typed runtime-code node.
pub struct AstNode {
    pub pos: Pos,
    pub ty: Type,
    pub kind: AstKind,
}

/// One candidate of a deferred overloaded call.
#[derive(Clone)]
pub enum OverloadCase {
    Builtin(Rc<Builtin>),
    Inst(Rc<RefCell<InstTable>>),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    And,
    Or,
    Xor,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Not,
}

pub enum AstKind {
    IntConst(i64),
    FloatConst(f32),
    DoubleConst(f64),
    BoolConst(bool),
    CharConst(char),
    StringConst(String),
    SymbolConst(Symbol),
    TypeConst(Type),
    VoidConst,
    /// A value of known type with no known construction, e.g. a function
    /// parameter inside an instantiation.
    Unknown,
    /// A variable reference, compiled as a load.
    Var(Symbol),
    /// A reference to a function known by name but not yet (or externally)
    /// compiled. `local` marks in-progress instantiations as opposed to
    /// extern declarations.
    FuncStub { name: Symbol, local: bool },
    Func { name: Option<Symbol>, args: Vec<Symbol>, body: Ast },
    Call { callee: Ast, args: Vec<Ast> },
    Overload { cases: Vec<(Type, OverloadCase)> },
    /// Representation change of the inner node to this node's type.
    Coerce(Ast),
    Do(Vec<Ast>),
    If { cond: Ast, then: Ast },
    IfElse { cond: Ast, then: Ast, else_: Ast },
    While { cond: Ast, body: Ast },
    Def { name: Symbol, init: Ast },
    Assign { dest: Ast, src: Ast },
    Binary { op: BinaryOp, lhs: Ast, rhs: Ast },
    Unary { op: UnaryOp, operand: Ast },
}

/// Builds a node.
pub fn node(pos: Pos, ty: Type, kind: AstKind) -> Ast {
    Rc::new(RefCell::new(AstNode { pos, ty, kind }))
}

/// The node's type.
pub fn ty(ast: &Ast) -> Type {
    ast.borrow().ty
}

/// Clones a node one level deep: same kind and children, fresh cell. Used
/// when a shared node must be retagged without aliasing the original.
pub fn shallow_copy(ast: &Ast) -> Ast {
    let borrowed = ast.borrow();
    let kind = match &borrowed.kind {
        AstKind::IntConst(i) => AstKind::IntConst(*i),
        AstKind::FloatConst(f) => AstKind::FloatConst(*f),
        AstKind::DoubleConst(d) => AstKind::DoubleConst(*d),
        AstKind::BoolConst(b) => AstKind::BoolConst(*b),
        AstKind::CharConst(c) => AstKind::CharConst(*c),
        AstKind::StringConst(s) => AstKind::StringConst(s.clone()),
        AstKind::SymbolConst(s) => AstKind::SymbolConst(*s),
        AstKind::TypeConst(t) => AstKind::TypeConst(*t),
        AstKind::VoidConst => AstKind::VoidConst,
        AstKind::Unknown => AstKind::Unknown,
        AstKind::Var(s) => AstKind::Var(*s),
        AstKind::FuncStub { name, local } => AstKind::FuncStub { name: *name, local: *local },
        AstKind::Func { name, args, body } => {
            AstKind::Func { name: *name, args: args.clone(), body: body.clone() }
        }
        AstKind::Call { callee, args } => {
            AstKind::Call { callee: callee.clone(), args: args.clone() }
        }
        AstKind::Overload { cases } => AstKind::Overload { cases: cases.clone() },
        AstKind::Coerce(inner) => AstKind::Coerce(inner.clone()),
        AstKind::Do(nodes) => AstKind::Do(nodes.clone()),
        AstKind::If { cond, then } => AstKind::If { cond: cond.clone(), then: then.clone() },
        AstKind::IfElse { cond, then, else_ } => AstKind::IfElse {
            cond: cond.clone(),
            then: then.clone(),
            else_: else_.clone(),
        },
        AstKind::While { cond, body } => {
            AstKind::While { cond: cond.clone(), body: body.clone() }
        }
        AstKind::Def { name, init } => AstKind::Def { name: *name, init: init.clone() },
        AstKind::Assign { dest, src } => {
            AstKind::Assign { dest: dest.clone(), src: src.clone() }
        }
        AstKind::Binary { op, lhs, rhs } => {
            AstKind::Binary { op: *op, lhs: lhs.clone(), rhs: rhs.clone() }
        }
        AstKind::Unary { op, operand } => {
            AstKind::Unary { op: *op, operand: operand.clone() }
        }
    };
    node(borrowed.pos, borrowed.ty, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use basil_types::{T_INT, T_STRING};

    #[test]
    fn nodes_carry_their_type() {
        let n = node(Pos::default(), T_INT, AstKind::IntConst(7));
        assert_eq!(ty(&n), T_INT);
    }

    #[test]
    fn shallow_copy_detaches_the_cell_but_shares_children() {
        let child = node(Pos::default(), T_INT, AstKind::IntConst(1));
        let call = node(
            Pos::default(),
            T_INT,
            AstKind::Call { callee: child.clone(), args: vec![] },
        );
        let copy = shallow_copy(&call);
        copy.borrow_mut().ty = T_STRING;
        assert_eq!(ty(&call), T_INT); // original unchanged
        match &copy.borrow().kind {
            AstKind::Call { callee, .. } => assert!(Rc::ptr_eq(callee, &child)),
            _ => panic!("copy changed kind"),
        }
    }
}
