//! CPLEX LP rendering of a [`MilpModel`].

use std::fmt::{self, Display, Formatter};

use salesman_core::{LinearExpr, MilpModel, VarKind};

const TERMS_PER_LINE: usize = 8;

/// Displays a model in CPLEX LP format, as read by `cbc`.
///
/// Variable names are taken verbatim from the model; binaries land in the
/// `Binaries` section and bounded integers in `Bounds` plus `Generals`.
///
/// # Examples
/// ```
/// use salesman_core::{DistanceMatrix, build_model};
/// use salesman_solver_cbc::LpFormat;
///
/// let matrix = DistanceMatrix::from_rows(
///     vec!["A".into(), "B".into()],
///     vec![vec![0.0, 5.0], vec![5.0, 0.0]],
/// )?;
/// let model = build_model(&matrix)?;
/// let text = LpFormat::new(&model).to_string();
/// assert!(text.starts_with("\\ tour model over 2 nodes\nMinimize\n obj: 5 x_0_1 + 5 x_1_0\n"));
/// assert!(text.ends_with("End\n"));
/// # Ok::<(), salesman_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LpFormat<'a>(&'a MilpModel);

impl<'a> LpFormat<'a> {
    /// Wrap `model` for display.
    #[must_use]
    pub const fn new(model: &'a MilpModel) -> Self {
        Self(model)
    }
}

impl Display for LpFormat<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let mut out = LpWriter(f);
        out.line(format_args!("\\ tour model over {} nodes", model.size()))?;

        out.line("Minimize")?;
        out.row("obj", model.objective(), model)?;
        out.line("")?;

        out.line("Subject To")?;
        for constraint in model.constraints() {
            out.row(&constraint.name, &constraint.expr, model)?;
            out.line(format_args!(
                " {} {}",
                constraint.relation.symbol(),
                constraint.rhs
            ))?;
        }

        out.line("Bounds")?;
        for var in model.variables() {
            if var.kind != VarKind::Binary {
                out.line(format_args!(" {} <= {} <= {}", var.lower, var.name, var.upper))?;
            }
        }

        out.names("Binaries", model, |kind| kind == VarKind::Binary)?;
        out.names("Generals", model, |kind| kind == VarKind::Integer)?;
        out.line("End")
    }
}

struct LpWriter<'a, 'b>(&'a mut Formatter<'b>);

impl LpWriter<'_, '_> {
    fn line<T: Display>(&mut self, value: T) -> fmt::Result {
        writeln!(self.0, "{value}")
    }

    /// Write ` name: terms`, wrapping long expressions onto continuation
    /// lines and leaving the cursor after the last term.
    fn row(&mut self, name: &str, expr: &LinearExpr, model: &MilpModel) -> fmt::Result {
        write!(self.0, " {name}:")?;
        if expr.terms().is_empty() {
            return write!(self.0, " 0");
        }
        for (chunk_index, chunk) in expr.terms().chunks(TERMS_PER_LINE).enumerate() {
            if chunk_index > 0 {
                write!(self.0, "\n   ")?;
            }
            for (offset, &(id, coefficient)) in chunk.iter().enumerate() {
                let name = model
                    .variable(id)
                    .map_or("", |variable| variable.name.as_str());
                let first = chunk_index == 0 && offset == 0;
                match (first, coefficient < 0.0) {
                    (true, false) => write!(self.0, " {coefficient} {name}")?,
                    (true, true) => write!(self.0, " - {} {name}", -coefficient)?,
                    (false, false) => write!(self.0, " + {coefficient} {name}")?,
                    (false, true) => write!(self.0, " - {} {name}", -coefficient)?,
                }
            }
        }
        Ok(())
    }

    fn names(
        &mut self,
        section: &str,
        model: &MilpModel,
        keep: impl Fn(VarKind) -> bool,
    ) -> fmt::Result {
        let selected: Vec<&str> = model
            .variables()
            .iter()
            .filter(|var| keep(var.kind))
            .map(|var| var.name.as_str())
            .collect();
        if selected.is_empty() {
            return Ok(());
        }
        self.line(section)?;
        for chunk in selected.chunks(TERMS_PER_LINE) {
            self.line(format_args!(" {}", chunk.join(" ")))?;
        }
        Ok(())
    }
}
