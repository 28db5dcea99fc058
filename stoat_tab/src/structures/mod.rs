/*!
The abstract elements of a tableau: truth values, terms, formulas, signs, and signed formulas.

The layering is strict --- truth values know nothing of terms, terms nothing of formulas, and so on up to signed formulas --- mirroring the dependency order of the library as a whole.
*/

pub mod formula;
pub mod sign;
pub mod signed;
pub mod term;
pub mod truth;
