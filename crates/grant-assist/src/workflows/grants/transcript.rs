/// Notes from the DCNR planning session webinar, used when the program page cannot be reached.
pub const PLANNING_SESSION_TRANSCRIPT: &str = "\
DCNR Community Conservation Partnerships Program - Planning Session Information

Important Dates:
- Grant applications accepted: January 21st, 2025 through April 2nd, 2025
- Application deadline: April 2nd, 2025 at 4:00 PM

Eligible Applicants:
- Municipalities
- Municipal authorities
- Council of Governments
- Conservation districts
- School districts
- Nonprofit 501c3 organizations

Note: Municipal applicants are strongly encouraged because they are eligible for Keystone Fund. Nonprofits are only eligible for environmental stewardship funds, which is very limited.

Planning Project Types:
1. Master Site Development Plans
   - Site-specific plan for development, rehabilitation, use, and management
   - Focus on one site owned or controlled by applicant
   - Typical grant award: $25,000 to $75,000

2. Comprehensive Recreation, Park, Open Space & Greenway Plans
   - Long-term development for park recreation systems
   - Can be municipal, county, or regional scale
   - Establishes priorities, actions, costs, and timeline

3. Conservation Management/Stewardship Plans
   - Analyzes conservation of natural areas and critical habitat
   - Includes public access and passive recreation opportunities
   - Requires collaboration with conservancy or land trust

4. Swimming Pool Complex Feasibility Studies
   - Structural assessment of existing features
   - Market analysis and financial capability assessment
   - Public engagement essential

5. Indoor Recreation Facility Feasibility Studies
   - For recreation centers, gymnasiums, indoor ice rinks
   - Includes parking, accessibility, and site amenities
   - Focus on one site only

Grant Requirements:
- Minimum of two quotes from qualified consultants required
- Dollar-for-dollar match requirement
- Detailed scope of work required (not lump sum)
- Public participation required for all plans
- For existing facilities: 25-year minimum lease or ownership

Ready-to-Go Status Requirements:
1. Clear and detailed scope of work uploaded
2. Realistic, detailed budget (no lump sums)
3. Funding commitment letter for match
4. Site control documentation (for site-specific plans)

Budget Categories:
- Contracted professional services
- Donated professional services
- Other project costs (cash and non-cash)

Scoring (100 points maximum):
- Ready-to-go status
- Criteria questions responses
- Consistency with local/regional plans
- Partnerships

Key Tips:
- Contact your bureau regional advisor early
- Review frequently asked questions document
- Involve qualified consultants early
- Obtain detailed cost estimates
- Reference help text in grant application
- Visit apps.dcnr.pa.gov for resources";
